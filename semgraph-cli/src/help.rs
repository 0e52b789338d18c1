// Copyright 2025 Semgraph Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The `help` command.

const TOPICS: &[(&str, &str)] = &[
    (
        "go",
        "go <index>\n  Move to the neighbor at <index> in the current neighbor listing.",
    ),
    (
        "semex",
        "semex add <name> <expr>\n  Compile <expr> and register it under <name>.\n\
         semex list\n  Print the registered semexes.\n\
         semex toggle <name>\n  Turn a semex on or off.\n\
         semex remove <name>\n  Forget a semex.\n\n\
         Expressions: filters (anything, logline, tag, id, word_count),\n\
         juxtaposition for concatenation, '|' for alternatives, '*' for\n\
         zero-or-more, parentheses for grouping.",
    ),
    (
        "node-ref",
        "A node reference is 'current' (or 'cur'), or\n\
         'cur.neighbors[<i>]' ('cur.nbrs[<i>]') for the i-th neighbor.",
    ),
    (
        "info",
        "info [node-ref]\n  Describe a node. Defaults to 'current'.",
    ),
    ("quit", "quit\n  Leave the shell."),
];

pub fn print_help(topic: Option<&str>) {
    match topic {
        None => {
            println!("help <topic>");
            for (name, _) in TOPICS {
                println!("  {name}");
            }
        }
        Some(topic) => match TOPICS.iter().find(|(name, _)| *name == topic) {
            Some((_, text)) => println!("{text}"),
            None => println!("no help for '{topic}'"),
        },
    }
}

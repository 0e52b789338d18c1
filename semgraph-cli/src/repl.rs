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

//! The command loop.
//!
//! User-input errors (bad command, unknown semex name, neighbor index out
//! of range, a semex that fails its stability guard) print a message and
//! keep the session alive; anything else is a bug and propagates out.

use crate::help::print_help;
use crate::render;
use anyhow::Result;
use semgraph_core::{Result as CoreResult, SemgraphError};
use semgraph_query::{anchored_at, most_likely_endpoints, parse_node_ref, Context};
use semgraph_semex::{ast_to_semex, parse_semex, FilterTable};
use std::io::{self, BufRead, Write};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Go(usize),
    SemexAdd { name: String, expr: String },
    SemexList,
    SemexToggle(String),
    SemexRemove(String),
    Info(Option<String>),
    Help(Option<String>),
    Quit,
}

fn parse_command(line: &str) -> CoreResult<Command> {
    let mut words = line.split_whitespace();
    let head = words
        .next()
        .ok_or_else(|| SemgraphError::Parse("empty command".to_string()))?;

    let command = match head {
        "go" | "g" => {
            let idx = words
                .next()
                .ok_or_else(|| SemgraphError::Parse("go needs a neighbor index".to_string()))?;
            let idx = idx
                .parse()
                .map_err(|_| SemgraphError::Parse(format!("'{idx}' is not an index")))?;
            Command::Go(idx)
        }
        "semex" | "s" => {
            let sub = words
                .next()
                .ok_or_else(|| SemgraphError::Parse("semex needs a subcommand".to_string()))?;
            match sub {
                "add" => {
                    let name = words
                        .next()
                        .ok_or_else(|| SemgraphError::Parse("semex add needs a name".to_string()))?
                        .to_string();
                    let expr = words.by_ref().collect::<Vec<_>>().join(" ");
                    if expr.is_empty() {
                        return Err(SemgraphError::Parse(
                            "semex add needs an expression".to_string(),
                        ));
                    }
                    Command::SemexAdd { name, expr }
                }
                "list" => Command::SemexList,
                "toggle" => Command::SemexToggle(
                    words
                        .next()
                        .ok_or_else(|| {
                            SemgraphError::Parse("semex toggle needs a name".to_string())
                        })?
                        .to_string(),
                ),
                "remove" => Command::SemexRemove(
                    words
                        .next()
                        .ok_or_else(|| {
                            SemgraphError::Parse("semex remove needs a name".to_string())
                        })?
                        .to_string(),
                ),
                other => {
                    return Err(SemgraphError::Parse(format!(
                        "unknown semex subcommand '{other}'"
                    )))
                }
            }
        }
        "info" => Command::Info(words.next().map(str::to_string)),
        "help" | "h" => Command::Help(words.next().map(str::to_string)),
        "quit" | "q" => Command::Quit,
        other => return Err(SemgraphError::Parse(format!("unknown command '{other}'"))),
    };

    if let Some(extra) = words.next() {
        return Err(SemgraphError::Parse(format!(
            "trailing input '{extra}'"
        )));
    }
    Ok(command)
}

/// Errors the shell reports and survives; everything else is fatal.
fn is_recoverable(err: &SemgraphError) -> bool {
    matches!(
        err,
        SemgraphError::Parse(_)
            | SemgraphError::NameNotFound(_)
            | SemgraphError::NeighborOutOfBounds { .. }
            | SemgraphError::UnknownFilter(_)
            | SemgraphError::SpectralRadiusExceeded { .. }
    )
}

struct Repl {
    ctx: Context,
    filters: FilterTable,
    star_length: f64,
}

enum Flow {
    Continue,
    Quit,
}

impl Repl {
    fn dispatch(&mut self, command: Command) -> CoreResult<Flow> {
        match command {
            Command::Go(idx) => {
                let view = self.ctx.go_to_neighbor(idx)?;
                render::print_view(self.ctx.graph(), &view, &self.ctx.registry);
            }
            Command::SemexAdd { name, expr } => {
                let ast = parse_semex(&expr)?;
                let semex = ast_to_semex(
                    &ast,
                    self.ctx.graph(),
                    self.ctx.transition(),
                    &self.filters,
                    self.star_length,
                )?;
                // compile the production form eagerly so degenerate
                // expressions are rejected at add time
                semex.compile_operator()?;
                self.ctx.registry.add(name, semex, expr);
                println!("added");
            }
            Command::SemexList => {
                for (name, entry) in self.ctx.registry.iter() {
                    let marker = if entry.active { "on " } else { "off" };
                    println!("  [{marker}] {name}: {}", entry.source);
                }
            }
            Command::SemexToggle(name) => {
                let was_active = self.ctx.registry.toggle(&name)?;
                println!("{name} is now {}", if was_active { "off" } else { "on" });
            }
            Command::SemexRemove(name) => {
                self.ctx.registry.remove(&name)?;
                println!("removed {name}");
            }
            Command::Info(node_ref) => {
                let text = node_ref.as_deref().unwrap_or("current");
                let node_ref = parse_node_ref(text)
                    .ok_or_else(|| SemgraphError::Parse(format!("bad node-ref '{text}'")))?;
                let index = self.ctx.resolve_node_ref(node_ref)?;
                println!("{}", self.ctx.graph().vertex(index));
                for (name, entry) in self.ctx.registry.active() {
                    let anchored = anchored_at(self.ctx.transition(), &entry.semex, index);
                    let endpoints = most_likely_endpoints(&anchored, 4)?;
                    println!("{name}:");
                    for (endpoint, weight) in endpoints {
                        println!(
                            "  {weight:.3e} {}",
                            render::shorten(&self.ctx.graph().vertex(endpoint).to_string(), 68)
                        );
                    }
                }
            }
            Command::Help(topic) => print_help(topic.as_deref()),
            Command::Quit => {
                println!("goodbye");
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }
}

/// Run the shell until `quit` or end of input.
pub fn run(ctx: Context, filters: FilterTable, star_length: f64) -> Result<()> {
    let mut repl = Repl {
        ctx,
        filters,
        star_length,
    };

    let view = repl.ctx.view()?;
    render::print_view(repl.ctx.graph(), &view, &repl.ctx.registry);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = parse_command(&line).and_then(|cmd| repl.dispatch(cmd));
        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) if is_recoverable(&err) => println!("error: {err}"),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

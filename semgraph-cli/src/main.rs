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

//! The semgraph shell: parse a log file, build its graph, and navigate it
//! interactively.

mod help;
mod render;
mod repl;

use anyhow::{bail, Context as _, Result};
use clap::Parser;
use semgraph_core::{parse_log_file, SemgraphConfig};
use semgraph_graph::build_log_graph;
use semgraph_query::Context;
use semgraph_semex::FilterTable;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Navigate a log corpus as a weighted graph", long_about = None)]
struct Args {
    /// Log file to load
    log_file: PathBuf,

    /// Line number to start at (zero-based, counts parsed lines)
    #[arg(short, long, default_value_t = 0)]
    start_line: usize,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SemgraphConfig::load(args.config.as_deref())
        .context("loading configuration")?;

    let parsed = parse_log_file(&args.log_file)
        .with_context(|| format!("reading {}", args.log_file.display()))?;
    if parsed.lines.is_empty() {
        bail!(
            "{}: no parseable log lines",
            args.log_file.display()
        );
    }
    if args.start_line >= parsed.lines.len() {
        bail!(
            "start line {} out of range ({} parsed lines)",
            args.start_line,
            parsed.lines.len()
        );
    }

    let graph = Arc::new(build_log_graph(&parsed, &config.graph));
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph ready"
    );

    // log lines occupy the first arena indices, in file order
    let ctx = Context::new(graph, args.start_line).with_num_choose(config.query.num_choose);
    repl::run(ctx, FilterTable::with_defaults(), config.query.star_length)
}

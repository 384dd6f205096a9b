// File: src/main.rs
//
// Demo entry point for the Cyon runtime core.
// Drives the loop control stack, the native registry, and the statistics
// report end to end so embedders can see the runtime working without a
// full interpreter in front of it.

mod errors;
mod runtime;

use clap::{Parser as ClapParser, Subcommand};
use colored::Colorize;
use runtime::{Runtime, Value};

#[derive(ClapParser)]
#[command(
    name = "cyon",
    about = "Cyon: an embeddable scripting language runtime",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Exercise every loop driver against a live runtime
    Demo,

    /// List the native functions registered at startup
    Natives,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),

        Commands::Natives => {
            let runtime = Runtime::new();
            for name in runtime.natives.names() {
                println!("{}", name);
            }
        }
    }
}

fn run_demo() {
    let mut runtime = Runtime::new();

    println!("{}", "counted range, break at 6".bold());
    let mut visited = Vec::new();
    runtime.loops.for_range(0, 10, 2, |loops, i| {
        if i >= 6 {
            loops.signal_break();
        } else {
            visited.push(Value::Int(i));
        }
    });
    runtime.stats.breaks_hit += 1;
    runtime.stats.total_iterations += visited.len() as u64;
    runtime.call_native("print", &visited);

    println!("{}", "foreach over strings, skip the middle".bold());
    let words = ["alpha", "beta", "gamma"];
    let mut kept = Vec::new();
    runtime.loops.for_each(&words, |loops, word| {
        if *word == "beta" {
            loops.signal_continue();
        } else {
            kept.push(Value::str_ref(word));
        }
    });
    runtime.stats.continues_hit += 1;
    runtime.stats.total_iterations += words.len() as u64;
    runtime.call_native("print", &kept);

    println!("{}", "nested 2x3 grid, inner continue at column 1".bold());
    let mut cells = Vec::new();
    runtime.loops.nested_2d(2, 3, |loops, i, j| {
        if j == 1 {
            loops.signal_continue();
        } else {
            cells.push(Value::str_ref(&format!("({},{})", i, j)));
        }
    });
    runtime.stats.continues_hit += 2;
    runtime.stats.total_iterations += 6;
    runtime.call_native("print", &cells);

    println!("{}", "repeat with a user-registered native".bold());
    runtime
        .register_native("describe", |_rt, args| {
            let count = args.len() as i64;
            Value::str(format!("{} argument(s)", count))
        })
        .expect("registry has room for the demo native");
    let echoed = runtime.call_native("describe", &[Value::Int(1), Value::Nil]);
    runtime.loops.repeat_n(2, |_, _| {});
    runtime.stats.total_iterations += 2;
    runtime.call_native("print", &[echoed]);

    println!();
    runtime.print_stats();
}

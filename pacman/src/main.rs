mod config;
mod game;
mod render;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use config::RunConfig;
use game::{ghost_agents, play, Outcome};
use log::info;
use pacman_agents::{better_evaluation, Agent, DecisionAgent, Strategy};
use pacman_core::{layouts, perft_detailed, perft_divide, GameState, Layout, PacmanState};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pacman", about = "Adversarial search agents for a ghost-chasing game")]
struct Cli {
    /// TOML run configuration (defaults to ./pacman.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play games with the configured agent against random ghosts
    Play {
        #[command(flatten)]
        agent: AgentArgs,
        #[arg(long)]
        games: Option<u32>,
        #[arg(long)]
        max_moves: Option<u32>,
        #[arg(long)]
        ghost_seed: Option<u64>,
        /// Only print the results
        #[arg(long)]
        quiet: bool,
    },
    /// Run one search from the layout's starting state
    Search {
        #[command(flatten)]
        agent: AgentArgs,
    },
    /// Count game-tree leaves to a depth in rounds
    Perft {
        #[arg(long)]
        layout: Option<String>,
        depth: u32,
        /// Break the count down by pacman's first action
        #[arg(long)]
        divide: bool,
    },
    /// Show the evaluations of the layout's starting state
    Eval {
        #[arg(long)]
        layout: Option<String>,
    },
    /// List the built-in layouts
    Layouts,
}

#[derive(Args)]
struct AgentArgs {
    /// Built-in layout name or path to a layout file
    #[arg(long)]
    layout: Option<String>,
    #[arg(long)]
    strategy: Option<Strategy>,
    #[arg(long)]
    depth: Option<u32>,
    #[arg(long)]
    evaluation: Option<String>,
    /// Seed for reflex tie-breaking
    #[arg(long)]
    seed: Option<u64>,
}

impl AgentArgs {
    fn apply(self, config: &mut RunConfig) {
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(strategy) = self.strategy {
            config.agent.strategy = strategy;
        }
        if let Some(depth) = self.depth {
            config.agent.depth = depth;
        }
        if let Some(evaluation) = self.evaluation {
            config.agent.evaluation = evaluation;
        }
        if self.seed.is_some() {
            config.agent.seed = self.seed;
        }
    }
}

/// Resolves a built-in layout name, falling back to a file path.
fn load_layout(name: &str) -> Result<Layout> {
    if let Some(layout) = layouts::by_name(name) {
        return layout.with_context(|| format!("built-in layout '{}' is malformed", name));
    }
    let text = std::fs::read_to_string(name).with_context(|| {
        format!(
            "'{}' is neither a built-in layout ({}) nor a readable file",
            name,
            layouts::NAMES.join(", ")
        )
    })?;
    Layout::parse(&text).with_context(|| format!("failed to parse layout {}", name))
}

fn run_play(config: &RunConfig, quiet: bool) -> Result<()> {
    let layout = load_layout(&config.layout)?;
    let mut pacman = DecisionAgent::<PacmanState>::from_config(&config.agent)?;
    info!(
        "Playing {} game(s) on '{}' with {}",
        config.games,
        config.layout,
        pacman.name()
    );

    let show = config.render && !quiet;
    let mut stdout = io::stdout();
    let mut wins = 0;
    let mut total_score = 0i64;

    for game in 1..=config.games {
        let initial = layout.initial_state();
        let seed = config.ghost_seed.map(|s| s.wrapping_add(u64::from(game)));
        let mut ghosts = ghost_agents(&initial, seed);

        if show {
            render::draw(&mut stdout, &initial)?;
        }
        let mut draw_error = None;
        let record = play(initial, &mut pacman, &mut ghosts, config.max_moves, |state| {
            if show && draw_error.is_none() {
                println!();
                draw_error = render::draw(&mut stdout, state).err();
            }
        });
        if let Some(e) = draw_error {
            return Err(e.into());
        }

        if record.outcome == Outcome::Win {
            wins += 1;
        }
        total_score += i64::from(record.score);
        info!(
            "Game {}: {:?} score={} moves={} nodes={}",
            game, record.outcome, record.score, record.moves, record.nodes
        );
        println!(
            "Game {}: {:?}, score {}, {} moves, {} nodes searched",
            game, record.outcome, record.score, record.moves, record.nodes
        );
    }

    if config.games > 0 {
        println!(
            "\nWin rate: {}/{}  Average score: {:.1}",
            wins,
            config.games,
            total_score as f64 / f64::from(config.games)
        );
    }
    Ok(())
}

fn run_search(config: &RunConfig) -> Result<()> {
    let layout = load_layout(&config.layout)?;
    let state = layout.initial_state();
    let mut agent = DecisionAgent::<PacmanState>::from_config(&config.agent)?;

    render::draw(&mut io::stdout(), &state)?;
    println!(
        "Searching with {}, evaluation '{}'...",
        agent.name(),
        config.agent.evaluation
    );

    let start = Instant::now();
    let result = agent.search(&state);
    let elapsed = start.elapsed();

    match result.best_action {
        Some(action) => {
            println!("\nBest action: {}", action);
            println!("Value: {:.2}", result.value);
            println!("Nodes: {}", result.nodes);
            println!("Time: {:.3}s", elapsed.as_secs_f64());
        }
        None => println!("No legal actions available"),
    }
    Ok(())
}

fn run_perft(layout: &str, depth: u32, divide: bool) -> Result<()> {
    let state = load_layout(layout)?.initial_state();
    println!("Running perft({}) on '{}'...", depth, layout);

    if divide {
        let results = perft_divide(&state, depth);
        let mut total = 0;
        for (action, count) in &results {
            println!("{}: {}", action, count);
            total += count;
        }
        println!("\nTotal: {}", total);
        return Ok(());
    }

    let start = Instant::now();
    let detailed = perft_detailed(&state, depth);
    let elapsed = start.elapsed();

    println!("Leaves: {}", detailed.nodes);
    println!("Wins: {}", detailed.wins);
    println!("Losses: {}", detailed.losses);
    println!("Successors: {}", detailed.successors);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_eval(layout: &str) -> Result<()> {
    let state = load_layout(layout)?.initial_state();
    render::draw(&mut io::stdout(), &state)?;
    println!("Score: {}", state.score());
    println!("Composite evaluation: {:.2}", better_evaluation(&state));
    Ok(())
}

fn run_layouts() -> Result<()> {
    for name in layouts::NAMES {
        let layout = layouts::by_name(name)
            .ok_or_else(|| anyhow!("missing built-in layout '{}'", name))??;
        println!(
            "{:<10} {}x{}  {} ghost(s)",
            name,
            layout.width(),
            layout.height(),
            layout.agent_count() - 1
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut config = RunConfig::discover(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            agent,
            games,
            max_moves,
            ghost_seed,
            quiet,
        } => {
            agent.apply(&mut config);
            if let Some(games) = games {
                config.games = games;
            }
            if let Some(max_moves) = max_moves {
                config.max_moves = max_moves;
            }
            if ghost_seed.is_some() {
                config.ghost_seed = ghost_seed;
            }
            run_play(&config, quiet)
        }
        Command::Search { agent } => {
            agent.apply(&mut config);
            run_search(&config)
        }
        Command::Perft {
            layout,
            depth,
            divide,
        } => run_perft(layout.as_deref().unwrap_or(&config.layout), depth, divide),
        Command::Eval { layout } => run_eval(layout.as_deref().unwrap_or(&config.layout)),
        Command::Layouts => run_layouts(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "pacman",
            "search",
            "--strategy",
            "expectimax",
            "--depth",
            "3",
            "--layout",
            "trapped",
        ]);
        let mut config = RunConfig::default();
        match cli.command {
            Command::Search { agent } => agent.apply(&mut config),
            _ => panic!("expected search"),
        }
        assert_eq!(config.agent.strategy, Strategy::Expectimax);
        assert_eq!(config.agent.depth, 3);
        assert_eq!(config.layout, "trapped");
        assert_eq!(config.agent.evaluation, "better");
    }

    #[test]
    fn test_bad_strategy_is_a_parse_error() {
        assert!(Cli::try_parse_from(["pacman", "search", "--strategy", "negamax"]).is_err());
    }

    #[test]
    fn test_load_builtin_and_missing_layouts() {
        assert!(load_layout("minimax").is_ok());
        assert!(load_layout("no/such/layout.lay").is_err());
    }
}

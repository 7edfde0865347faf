use clap::{Parser, Subcommand};
use runoff_vote::commands;
use runoff_vote::store::ElectionStore;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(name = "runoff-vote", about = "Round-based election engine with runoff rounds on ties")]
struct Opts {
    /// Path to the election snapshot file.
    #[clap(long, default_value = "election.json")]
    state: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new election snapshot.
    Init {
        /// Administrator identity (address-equivalent).
        admin: String,
        /// Maximum number of distinct voters per round.
        #[clap(long, default_value_t = 10)]
        max_voters: u32,
        /// Overwrite an existing snapshot.
        #[clap(long)]
        force: bool,
    },
    /// Register a candidate (admin only, round 1 only).
    AddCandidate {
        /// Identity submitting the command.
        caller: String,
        /// Candidate name.
        name: String,
    },
    /// Cast a ballot for a candidate.
    Vote {
        /// Identity casting the ballot.
        caller: String,
        /// Candidate name.
        candidate: String,
    },
    /// Raise or set the voter cap (admin only).
    SetMaxVoters {
        caller: String,
        max_voters: u32,
    },
    /// Close the current round without waiting for remaining ballots (admin only).
    CloseRound { caller: String },
    /// Reset per-round voting flags, optionally restricting eligibility (admin only).
    ResetVoters {
        caller: String,
        /// Restrict eligibility to these identities (repeatable); with no
        /// --voter flags, everyone is eligible again.
        #[clap(long = "voter")]
        voters: Vec<String>,
    },
    /// Restart the election from round 1 (admin only).
    Restart { caller: String },
    /// Show round status.
    Status {
        #[clap(long)]
        json: bool,
    },
    /// Show per-candidate results for the current round.
    Results {
        #[clap(long)]
        json: bool,
    },
    /// Show the winner, or the tied set while a runoff is open.
    Winners {
        #[clap(long)]
        json: bool,
    },
    /// List identities that have voted in the current round.
    Voters {
        #[clap(long)]
        json: bool,
    },
    /// Show whether an identity has voted / can vote this round.
    Check { identity: String },
}

fn main() {
    let opts = Opts::parse();
    let store = ElectionStore::new(opts.state);

    let result = match opts.command {
        Command::Init {
            admin,
            max_voters,
            force,
        } => commands::init(&store, &admin, max_voters, force),
        Command::AddCandidate { caller, name } => commands::add_candidate(&store, &caller, &name),
        Command::Vote { caller, candidate } => commands::vote(&store, &caller, &candidate),
        Command::SetMaxVoters { caller, max_voters } => {
            commands::set_max_voters(&store, &caller, max_voters)
        }
        Command::CloseRound { caller } => commands::close_round(&store, &caller),
        Command::ResetVoters { caller, voters } => commands::reset_voters(&store, &caller, voters),
        Command::Restart { caller } => commands::restart(&store, &caller),
        Command::Status { json } => commands::status(&store, json),
        Command::Results { json } => commands::results(&store, json),
        Command::Winners { json } => commands::winners(&store, json),
        Command::Voters { json } => commands::voters(&store, json),
        Command::Check { identity } => commands::check(&store, &identity),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

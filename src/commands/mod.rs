use crate::election::Election;
use crate::store::ElectionStore;
use colored::Colorize;
use itertools::Itertools;
use std::error::Error;

pub type CommandResult = Result<(), Box<dyn Error>>;

pub fn init(store: &ElectionStore, admin: &str, max_voters: u32, force: bool) -> CommandResult {
    if store.exists() && !force {
        return Err(format!(
            "election snapshot already exists at {} (use --force to overwrite)",
            store.path().display()
        )
        .into());
    }
    if max_voters == 0 {
        return Err("voter cap must be at least 1".into());
    }
    let election = Election::new(admin, max_voters);
    store.save(&election)?;
    println!(
        "🗳️  Election initialized: admin {}, voter cap {}",
        admin.cyan(),
        max_voters.to_string().cyan()
    );
    Ok(())
}

pub fn add_candidate(store: &ElectionStore, caller: &str, name: &str) -> CommandResult {
    let mut election = store.load()?;
    election.add_candidate(caller, name)?;
    store.save(&election)?;
    println!("✅ Candidate registered: {}", name.green());
    Ok(())
}

pub fn vote(store: &ElectionStore, caller: &str, candidate: &str) -> CommandResult {
    let mut election = store.load()?;
    let round_before = election.round();
    election.cast_vote(caller, candidate)?;
    store.save(&election)?;
    println!("🗳️  Vote recorded for {}", candidate.green());

    if election.is_complete() {
        println!(
            "🏆 Election decided: {}",
            election.winners().join(", ").bright_green().bold()
        );
    } else if election.round() > round_before {
        println!(
            "🔁 Round {} tied between {}; runoff round {} is open",
            round_before,
            election.candidates().iter().join(", ").yellow(),
            election.round().to_string().cyan()
        );
    }
    Ok(())
}

pub fn set_max_voters(store: &ElectionStore, caller: &str, max_voters: u32) -> CommandResult {
    let mut election = store.load()?;
    election.set_max_voters(caller, max_voters)?;
    store.save(&election)?;
    println!("✅ Voter cap set to {}", max_voters.to_string().cyan());
    Ok(())
}

pub fn close_round(store: &ElectionStore, caller: &str) -> CommandResult {
    let mut election = store.load()?;
    let round_before = election.round();
    election.force_close_round(caller)?;
    store.save(&election)?;

    if election.is_complete() {
        println!(
            "🏆 Round {} closed: election decided by {}",
            round_before,
            election.winners().join(", ").bright_green().bold()
        );
    } else {
        println!(
            "🔁 Round {} closed in a tie between {}; runoff round {} is open",
            round_before,
            election.candidates().iter().join(", ").yellow(),
            election.round().to_string().cyan()
        );
    }
    Ok(())
}

pub fn reset_voters(store: &ElectionStore, caller: &str, voters: Vec<String>) -> CommandResult {
    let mut election = store.load()?;
    let eligible = if voters.is_empty() { None } else { Some(voters) };
    let restricted = eligible.as_ref().map(|ids| ids.len());
    election.reset_voters_for_new_round(caller, eligible)?;
    store.save(&election)?;
    match restricted {
        Some(n) => println!(
            "✅ Voter flags reset; eligibility restricted to {} identities",
            n
        ),
        None => println!("✅ Voter flags reset; everyone is eligible again"),
    }
    Ok(())
}

pub fn restart(store: &ElectionStore, caller: &str) -> CommandResult {
    let mut election = store.load()?;
    election.restart(caller)?;
    store.save(&election)?;
    println!("🔄 Election restarted: round 1, no candidates, no votes");
    Ok(())
}

pub fn status(store: &ElectionStore, json: bool) -> CommandResult {
    let election = store.load()?;
    let status = election.status();
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }
    println!("📊 Round {}", status.current_round.to_string().cyan());
    println!(
        "   Votes: {} of {} ({} remaining)",
        status.total_votes, status.max_voters, status.remaining_votes
    );
    let state = if status.is_complete {
        "complete".bright_green().bold()
    } else if status.voting_active {
        "active".green()
    } else {
        "closed".yellow()
    };
    println!("   State: {}", state);
    Ok(())
}

pub fn results(store: &ElectionStore, json: bool) -> CommandResult {
    let election = store.load()?;
    let results = election.results();
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    if results.candidates.is_empty() {
        println!("No candidates registered yet.");
        return Ok(());
    }
    let total: u64 = results.counts.iter().sum();
    println!("📊 Round {} results", election.round().to_string().cyan());
    for (name, count) in results.candidates.iter().zip(&results.counts) {
        let pct = if total > 0 {
            *count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        println!("   {:<24} {:>4} votes ({:.1}%)", name.green(), count, pct);
    }
    Ok(())
}

pub fn winners(store: &ElectionStore, json: bool) -> CommandResult {
    let election = store.load()?;
    let winners = election.winners();
    if json {
        println!("{}", serde_json::to_string_pretty(&winners)?);
        return Ok(());
    }
    if winners.is_empty() {
        println!("No round has closed yet.");
    } else if election.is_complete() {
        println!("🏆 Winner: {}", winners.join(", ").bright_green().bold());
    } else {
        println!("🔁 Tied: {}", winners.join(", ").yellow());
    }
    Ok(())
}

pub fn voters(store: &ElectionStore, json: bool) -> CommandResult {
    let election = store.load()?;
    let voters = election.voters();
    if json {
        println!("{}", serde_json::to_string_pretty(&voters)?);
        return Ok(());
    }
    if voters.is_empty() {
        println!("No ballots cast this round.");
    } else {
        println!("🧾 Voted this round ({}):", voters.len());
        for voter in voters {
            println!("   {}", voter.cyan());
        }
    }
    Ok(())
}

pub fn check(store: &ElectionStore, identity: &str) -> CommandResult {
    let election = store.load()?;
    println!(
        "{}: has voted this round: {}, can vote now: {}",
        identity.cyan(),
        election.has_voted(identity),
        election.can_vote(identity)
    );
    Ok(())
}

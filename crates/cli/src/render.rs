use std::io::{self, Write};

use war_core::{AttackReport, GameError, Mission, SessionStatus, Verdict};

const RULE: &str = "==========================================";

pub fn map(out: &mut impl Write, status: &SessionStatus) -> io::Result<()> {
    writeln!(out, "\n{RULE}\n  TERRITORIES\n{RULE}")?;
    for territory in &status.territories {
        writeln!(
            out,
            "{:>3}. {:<29}  {:<9}  {:>4} troops",
            territory.index + 1,
            territory.name,
            territory.owner,
            territory.troops
        )?;
    }
    writeln!(
        out,
        "You hold {} of {} territories. Conquest streak: {}",
        status.owned_count(),
        status.territories.len(),
        status.consecutive_conquests
    )
}

pub fn mission(out: &mut impl Write, color: &str, mission: &Mission) -> io::Result<()> {
    writeln!(out, "\n{RULE}\n  YOUR MISSION\n{RULE}")?;
    writeln!(out, "Army: {color}")?;
    writeln!(out, "Objective: {}", mission.description)?;
    writeln!(out, "{RULE}")
}

pub fn battle(out: &mut impl Write, report: &AttackReport) -> io::Result<()> {
    let outcome = &report.outcome;
    writeln!(out, "\n--- BATTLE: {} vs {} ---", report.attacker, report.defender)?;
    writeln!(out, "  Attack die:  {}", outcome.attack_roll)?;
    writeln!(out, "  Defense die: {}", outcome.defense_roll)?;
    match outcome.verdict {
        Verdict::Conquered => {
            writeln!(
                out,
                "Victory! {} now belongs to {}.",
                report.defender, outcome.defender_owner
            )?;
            writeln!(
                out,
                "  > {} troops moved from {} to {}.",
                outcome.transferred, report.attacker, report.defender
            )
        }
        Verdict::DefenseHeld => {
            writeln!(out, "The defense held. {} keeps control.", report.defender)?;
            if outcome.attacker_penalized {
                writeln!(out, "  > {} lost 1 troop.", report.attacker)
            } else {
                writeln!(out, "  > {} has no troops to spare.", report.attacker)
            }
        }
    }
}

pub fn rejection(out: &mut impl Write, err: &GameError) -> io::Result<()> {
    let message = match err {
        GameError::NotOwnedByPlayer { owner, player } => {
            format!("That territory belongs to {owner}, not to your army ({player}).")
        }
        GameError::InsufficientTroops { .. } => {
            "At least 2 troops are needed to attack.".to_string()
        }
        GameError::SelfAttack => "A territory cannot attack itself.".to_string(),
        GameError::SameFactionAttack { color } => {
            format!("You cannot attack a territory of the same color ({color}).")
        }
        other => other.to_string(),
    };
    writeln!(out, "Error: {message}")
}

pub fn victory(out: &mut impl Write, color: &str) -> io::Result<()> {
    writeln!(out, "\n##################################################")?;
    writeln!(out, "#   Mission complete: the {color} army wins!")?;
    writeln!(out, "##################################################\n")
}

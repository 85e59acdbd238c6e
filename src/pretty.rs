//! Human-readable formatting of cards, events and table state, plus the
//! console observer the binary installs.

use holdem_shared::{
    ActionEvent, ActionKind, BlindKind, Card, GameAction, GameSnapshot, HandResult, PlayerId,
    PlayerPublic,
};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::table::TableObserver;

pub fn format_card(c: Card, color: bool) -> String {
    let text = c.to_string();
    if color && c.is_red() {
        text.red().to_string()
    } else {
        text
    }
}

pub fn format_cards(cards: &[Card], color: bool) -> String {
    cards
        .iter()
        .map(|&c| format_card(c, color))
        .collect::<Vec<_>>()
        .join(" ")
}

fn player_name(players: &[PlayerPublic], id: PlayerId, color: bool) -> String {
    let base = players
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("P{}", id));
    if color {
        base.bold().to_string()
    } else {
        base
    }
}

fn format_hand_result(r: &HandResult, players: &[PlayerPublic], color: bool) -> String {
    format!(
        "{}: {} [{}]",
        player_name(players, r.player_id, color),
        if color {
            r.value.category.name().cyan().to_string()
        } else {
            r.value.category.name().to_string()
        },
        format_cards(&r.value.cards, color)
    )
}

pub fn format_event_human(entry: &ActionEvent, players: &[PlayerPublic], color: bool) -> String {
    match entry {
        ActionEvent::PlayerAction { player_id, action } => {
            let who = player_name(players, *player_id, color);
            match action {
                ActionKind::Fold => format!("{} folds", who),
                ActionKind::Check => format!("{} checks", who),
                ActionKind::Call(n) => format!("{} calls {}", who, n),
                ActionKind::Bet(n) => format!("{} bets {}", who, n),
                ActionKind::Raise { to, by } => format!("{} raises {} to {}", who, by, to),
                ActionKind::PostBlind { kind, amount } => {
                    let k = match kind {
                        BlindKind::SmallBlind => "small blind",
                        BlindKind::BigBlind => "big blind",
                    };
                    format!("{} posts {} {}", who, k, amount)
                }
            }
        }
        ActionEvent::GameAction(GameAction::HandStarted { hand_no, button }) => {
            let title = format!("=== Hand #{} ===", hand_no);
            let line = format!(
                "{} (button: {})",
                if color {
                    title.bold().blue().to_string()
                } else {
                    title
                },
                player_name(players, *button, color)
            );
            line
        }
        ActionEvent::GameAction(GameAction::StageChanged(s)) => {
            let name = format!("== {:?} ==", s);
            if color {
                name.bold().purple().to_string()
            } else {
                name
            }
        }
        ActionEvent::GameAction(GameAction::DealtHole { player_id }) => {
            format!("dealt hole cards to {}", player_name(players, *player_id, color))
        }
        ActionEvent::GameAction(GameAction::DealtCommunity { cards }) => {
            format!("board +[{}]", format_cards(cards, color))
        }
        ActionEvent::GameAction(GameAction::Showdown { results }) => {
            let mut out = String::from("showdown:");
            for r in results {
                out.push_str(&format!("\n  {}", format_hand_result(r, players, color)));
            }
            out
        }
        ActionEvent::GameAction(GameAction::PotAwarded { winners, amount }) => {
            let names = winners
                .iter()
                .map(|&id| player_name(players, id, color))
                .collect::<Vec<_>>()
                .join(", ");
            let line = format!("pot of {} goes to {}", amount, names);
            if color {
                line.bold().green().to_string()
            } else {
                line
            }
        }
        ActionEvent::GameAction(GameAction::HandEnded) => String::new(),
        ActionEvent::GameAction(GameAction::GameEnded { standings }) => {
            let mut out = String::from("final standings:");
            for (rank, (id, stack)) in standings.iter().enumerate() {
                out.push_str(&format!(
                    "\n  #{} {}  {}",
                    rank + 1,
                    player_name(players, *id, color),
                    stack
                ));
            }
            out
        }
    }
}

/// Per-hand header: blinds and every seat's stack.
pub fn format_table_header(gs: &GameSnapshot, color: bool) -> String {
    let mut out = String::new();
    let blinds = if color {
        format!("{} SB {} / BB {}", "blinds:".yellow(), gs.sb, gs.bb)
    } else {
        format!("blinds: SB {} / BB {}", gs.sb, gs.bb)
    };
    out.push_str(&blinds);
    out.push('\n');
    for p in &gs.players {
        let marker = if p.id == gs.button { " (button)" } else { "" };
        out.push_str(&format!("  #{} {}  stack={}{}\n", p.id, p.name, p.stack, marker));
    }
    out
}

/// Prints events to stdout. In broadcast mode every seat's hole cards
/// and the stack after each action are shown as well.
pub struct ConsoleObserver {
    color: bool,
    broadcast: bool,
}

impl ConsoleObserver {
    pub fn new(broadcast: bool) -> Self {
        ConsoleObserver {
            color: std::io::stdout().is_terminal(),
            broadcast,
        }
    }
}

impl TableObserver for ConsoleObserver {
    fn on_event(&mut self, event: &ActionEvent, snapshot: &GameSnapshot) {
        match event {
            ActionEvent::GameAction(GameAction::HandStarted { .. }) => {
                println!();
                println!("{}", format_event_human(event, &snapshot.players, self.color));
                print!("{}", format_table_header(snapshot, self.color));
            }
            ActionEvent::GameAction(GameAction::DealtHole { player_id }) => {
                if self.broadcast {
                    if let Some(cards) = snapshot.player(*player_id).and_then(|p| p.cards) {
                        println!(
                            "  {}: [{}]",
                            player_name(&snapshot.players, *player_id, self.color),
                            format_cards(&cards, self.color)
                        );
                    }
                }
            }
            ActionEvent::GameAction(GameAction::HandEnded) => {}
            ActionEvent::PlayerAction { player_id, action } => {
                let mut line = format_event_human(event, &snapshot.players, self.color);
                if self.broadcast && !matches!(action, ActionKind::Fold | ActionKind::Check) {
                    if let Some(p) = snapshot.player(*player_id) {
                        line.push_str(&format!("  (stack {})", p.stack));
                    }
                }
                println!("{}", line);
            }
            _ => {
                let line = format_event_human(event, &snapshot.players, self.color);
                if !line.is_empty() {
                    println!("{}", line);
                }
            }
        }
    }
}

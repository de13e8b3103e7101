//! One open save file and the engine playing it.
//!
//! Every command that changes the game writes the save file before it
//! returns, so quitting (or crashing) never loses a finished turn or a
//! pending decision.

use std::path::PathBuf;

use tracing::info;

use citadel_db::{GameStore, MemoryStore};
use citadel_events::{TurnEngine, TurnReport};
use citadel_types::{
    AcknowledgeDirective, ChoiceDirective, PendingChoice, Savegame, Severity, TurnDirective,
};
use citadel_world::starting_city;

use crate::command::{Command, HELP};
use crate::config::AppConfig;
use crate::error::CliError;

/// An open game.
pub struct Session {
    store: MemoryStore,
    engine: TurnEngine,
    save_path: PathBuf,
}

impl Session {
    /// Load the save file named in `config`, founding a city if it holds
    /// none, and make sure one save is active.
    pub fn open(config: &AppConfig) -> Result<Self, CliError> {
        let catalog = citadel_content::catalog(&config.engine.selection.disabled_events)?;
        let engine = TurnEngine::new(catalog, config.engine.clone());

        let save_path = config.storage.save_path.clone();
        let store = if save_path.exists() {
            MemoryStore::load(&save_path)?
        } else {
            MemoryStore::new()
        };

        let mut session = Self {
            store,
            engine,
            save_path,
        };
        session.ensure_active_save(&config.storage.city_name)?;
        Ok(session)
    }

    fn ensure_active_save(&mut self, city_name: &str) -> Result<(), CliError> {
        if self.store.active_savegame_id().is_some() {
            return Ok(());
        }
        if let Some(existing) = self.store.savegames().first() {
            self.store.activate(existing.id)?;
            return self.persist();
        }

        let city = starting_city(Savegame::new(city_name))?;
        let id = city.id();
        self.store.insert_city(city)?;
        self.store.activate(id)?;
        info!(savegame_id = %id, city = city_name, "City founded");
        self.persist()
    }

    fn persist(&self) -> Result<(), CliError> {
        self.store.persist(&self.save_path)?;
        Ok(())
    }

    /// Run one command and render its outcome.
    ///
    /// [`Command::Quit`] is handled by the caller and renders nothing.
    pub fn execute(&mut self, command: Command) -> Result<String, CliError> {
        match command {
            Command::EndTurn => {
                let report = self.engine.finish_turn(&mut self.store)?;
                self.persist()?;
                Ok(render_report(&report))
            }
            Command::Board => self.board(),
            Command::Acknowledge => self.acknowledge(),
            Command::Decisions => self.decisions(),
            Command::Show { decision } => self.show(decision),
            Command::Resolve { decision, option } => self.resolve(decision, option),
            Command::Status => self.status(),
            Command::Help => Ok(HELP.to_owned()),
            Command::Quit => Ok(String::new()),
        }
    }

    /// City overview line.
    pub fn status(&self) -> Result<String, CliError> {
        let Some(id) = self.store.active_savegame_id() else {
            return Ok("No city is being played.".to_owned());
        };
        let city = self.store.city(id)?;
        let save = &city.savegame;
        let balance = city.balance();
        Ok(format!(
            "{}, year {}: {} coins ({:+} per year), {} of {} inhabitants housed, unrest {}%, \
             prestige {}, defense {}, {}",
            save.city_name,
            save.current_year,
            save.coins,
            balance.balance,
            save.population,
            city.housing_capacity(),
            save.unrest,
            city.prestige(),
            city.defense(),
            if save.is_enclosed {
                "walls closed"
            } else {
                "walls open"
            },
        ))
    }

    fn board(&self) -> Result<String, CliError> {
        let board = self.engine.notification_board(&self.store)?;
        Ok(board.current.map_or_else(
            || "No unread notifications.".to_owned(),
            |n| {
                format!(
                    "[{}] {} ({} unread)\n{}",
                    severity_label(n.severity),
                    n,
                    board.unacknowledged,
                    n.message
                )
            },
        ))
    }

    fn acknowledge(&mut self) -> Result<String, CliError> {
        let board = self.engine.notification_board(&self.store)?;
        let current = board.current.ok_or(CliError::NothingToAcknowledge)?;
        let directive = self
            .engine
            .acknowledge_notification(&mut self.store, current.id)?;
        self.persist()?;
        Ok(match directive {
            AcknowledgeDirective::MoreUnacknowledged => self.board()?,
            AcknowledgeDirective::Done => "All notifications read.".to_owned(),
        })
    }

    fn pending(&self, position: usize) -> Result<PendingChoice, CliError> {
        self.engine
            .pending_choices(&self.store)?
            .into_iter()
            .nth(position.checked_sub(1).ok_or(CliError::NoSuchDecision { position })?)
            .ok_or(CliError::NoSuchDecision { position })
    }

    fn decisions(&self) -> Result<String, CliError> {
        let pending = self.engine.pending_choices(&self.store)?;
        if pending.is_empty() {
            return Ok("No decisions are waiting.".to_owned());
        }
        let mut lines = Vec::with_capacity(pending.len());
        for (position, row) in (1_usize..).zip(&pending) {
            let view = self.engine.describe_pending_choice(&self.store, row.id)?;
            lines.push(format!("{position}. {}", view.title));
        }
        Ok(lines.join("\n"))
    }

    fn show(&self, decision: usize) -> Result<String, CliError> {
        let row = self.pending(decision)?;
        let view = self.engine.describe_pending_choice(&self.store, row.id)?;
        let mut out = format!(
            "[{}] {}\n{}\n",
            severity_label(view.severity),
            view.title,
            view.text
        );
        for (number, choice) in (1_usize..).zip(&view.choices) {
            out.push_str(&format!(
                "\n  {number}) {}\n     {}",
                choice.label, choice.description
            ));
        }
        Ok(out)
    }

    fn resolve(&mut self, decision: usize, option: usize) -> Result<String, CliError> {
        let row = self.pending(decision)?;
        let resolution = self.engine.resolve_pending_choice(
            &mut self.store,
            row.id,
            option.saturating_sub(1),
        )?;
        self.persist()?;
        let mut out = format!("{}\n{}", resolution.title, resolution.message);
        if resolution.directive == ChoiceDirective::MorePending {
            out.push_str("\n\nMore decisions are waiting. Type 'decisions' to list them.");
        }
        Ok(out)
    }
}

const fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "good news",
        Severity::Error => "disaster",
        Severity::Warning => "warning",
        Severity::Info => "news",
    }
}

fn render_report(report: &TurnReport) -> String {
    let mut out = format!("The year {} has begun.", report.year);
    if let Some(message) = &report.message {
        out.push('\n');
        out.push_str(message);
    }
    for notification in &report.notifications {
        out.push_str(&format!(
            "\n- [{}] {}",
            severity_label(notification.severity),
            notification.title
        ));
    }
    if report.directive == TurnDirective::ShowNotifications {
        out.push_str("\nRead them with 'board' and dismiss each with 'ack'.");
    }
    let decisions_waiting = match report.directive {
        TurnDirective::ShowNotifications => !report.pending_choices.is_empty(),
        TurnDirective::ShowPendingChoice => true,
        TurnDirective::None => false,
    };
    if decisions_waiting {
        out.push_str(&format!(
            "\n{} decision(s) await you under 'decisions'.",
            report.pending_choices.len()
        ));
    }
    out
}

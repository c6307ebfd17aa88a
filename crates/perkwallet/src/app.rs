//! Application wiring: store snapshot, repository, catalog, and the
//! reminder scheduler, plus one handler per CLI command.

use std::path::{Path, PathBuf};

use color_eyre::eyre::eyre;
use jiff::civil::{Date, DateTime};
use perkwallet_core::notify::{self, ReminderScheduler};
use perkwallet_core::{
    BenefitId, CardId, MemoryStore, PerkRepository, PerkStore, StaticCatalog, run_reset_sweep,
};

use crate::catalog::bundled_catalog;
use crate::store_json;
use crate::view;

/// Scheduler for headless runs: reminder requests are recorded in the log
/// instead of a platform notification center.
#[derive(Default)]
struct LoggingScheduler {
    next: u32,
}

impl ReminderScheduler for LoggingScheduler {
    fn schedule(&mut self, benefit_id: BenefitId, fire_on: Date) -> Option<String> {
        self.next += 1;
        let handle = format!("log-{}", self.next);
        tracing::info!("reminder for benefit {benefit_id} due {fire_on} ({handle})");
        Some(handle)
    }

    fn cancel(&mut self, handle: &str) {
        tracing::debug!("reminder request {handle} cancelled");
    }
}

pub struct App {
    repo: PerkRepository<MemoryStore>,
    catalog: StaticCatalog,
    store_path: PathBuf,
    scheduler: LoggingScheduler,
}

impl App {
    /// Load the snapshot from the data directory and repair legacy rows.
    pub fn open(data_dir: &Path, now: DateTime) -> color_eyre::Result<Self> {
        let catalog = bundled_catalog()?;
        let store_path = data_dir.join("store.json");
        let store = store_json::load(&store_path)?;
        let mut repo = PerkRepository::new(store);

        let backfilled = repo.backfill_cadences(&catalog, now)?;
        if backfilled > 0 {
            tracing::info!("backfilled cadence on {backfilled} benefit(s)");
        }

        Ok(Self {
            repo,
            catalog,
            store_path,
            scheduler: LoggingScheduler::default(),
        })
    }

    pub fn save(&self) -> color_eyre::Result<()> {
        store_json::save(self.repo.store(), &self.store_path)
    }

    /// Roll every elapsed benefit forward, then refresh reminders for the
    /// benefits that rolled. Failures are logged, not fatal.
    pub fn sweep(&mut self, now: DateTime) -> color_eyre::Result<String> {
        let outcome = run_reset_sweep(&mut self.repo, now);
        for (benefit_id, err) in &outcome.failures {
            tracing::error!("reset of benefit {benefit_id} failed: {err}");
        }
        for benefit_id in outcome.rolled.iter().copied() {
            self.resync_reminder(benefit_id)?;
        }
        if outcome.is_quiet() {
            tracing::debug!("sweep: {} benefit(s) checked, none due", outcome.checked);
        } else {
            tracing::info!(
                "sweep: {} checked, {} rolled, {} expired, {} failed",
                outcome.checked,
                outcome.rolled.len(),
                outcome.expired_entries.len(),
                outcome.failures.len(),
            );
        }
        Ok(format!(
            "{} benefit(s) checked, {} rolled, {} written off as expired\n",
            outcome.checked,
            outcome.rolled.len(),
            outcome.expired_entries.len(),
        ))
    }

    pub fn dashboard(&self, now: DateTime) -> String {
        let today = now.date();
        let metrics = perkwallet_core::Cadence::ALL
            .iter()
            .map(|&cadence| (cadence, self.repo.metrics(cadence, today)))
            .collect::<Vec<_>>();
        view::render_dashboard(&metrics, &self.repo.previews(today))
    }

    pub fn list(&self, now: DateTime) -> String {
        view::render_list(&self.repo.previews(now.date()))
    }

    pub fn cards(&self) -> String {
        view::render_cards(&self.repo.cards())
    }

    pub fn history(&self) -> String {
        view::render_history(&self.repo.history())
    }

    pub fn add_card(&mut self, template_id: &str, now: DateTime) -> color_eyre::Result<String> {
        let card_id = self.repo.add_card_from_catalog(&self.catalog, template_id, now)?;
        for benefit in self.repo.benefits() {
            if benefit.card_id == card_id {
                self.resync_reminder(benefit.benefit_id)?;
            }
        }
        Ok(format!("added card {card_id} from template {template_id}\n"))
    }

    pub fn remove_card(&mut self, card_id: u32) -> color_eyre::Result<String> {
        let card_id = CardId(card_id);
        // Cancel outstanding reminders before the cascade removes the rows
        for mut benefit in self.repo.benefits() {
            if benefit.card_id == card_id {
                if let Some(handle) = benefit.notification_handle.take() {
                    self.scheduler.cancel(&handle);
                }
            }
        }
        self.repo.delete_card(card_id)?;
        Ok(format!("removed card {card_id} and its benefits\n"))
    }

    pub fn mark_used(&mut self, benefit_id: u32, now: DateTime) -> color_eyre::Result<String> {
        let id = BenefitId(benefit_id);
        self.repo.mark_used(id, now)?;
        self.resync_reminder(id)?;
        let benefit = self.repo.benefit(id)?;
        Ok(format!(
            "marked {} used, ${:.2} redeemed\n",
            benefit.name, benefit.value
        ))
    }

    pub fn undo(&mut self, benefit_id: u32, now: DateTime) -> color_eyre::Result<String> {
        let id = BenefitId(benefit_id);
        self.repo.undo_mark_used(id, now)?;
        self.resync_reminder(id)?;
        let benefit = self.repo.benefit(id)?;
        Ok(format!("{} is available again\n", benefit.name))
    }

    pub fn snooze(
        &mut self,
        benefit_id: u32,
        until: Date,
        now: DateTime,
    ) -> color_eyre::Result<String> {
        let id = BenefitId(benefit_id);
        let benefit = self.repo.benefit(id)?;
        if until > benefit.period_end {
            return Err(eyre!(
                "cannot snooze past the period end {}",
                benefit.period_end
            ));
        }
        self.repo.snooze(id, until, now)?;
        Ok(format!("snoozed {} until {until}\n", benefit.name))
    }

    /// Re-place the external reminder after a state or period change.
    fn resync_reminder(&mut self, id: BenefitId) -> color_eyre::Result<()> {
        let mut benefit = self.repo.benefit(id)?;
        notify::sync_reminder(&mut benefit, &mut self.scheduler);
        self.repo.store_mut().update_benefit(benefit)?;
        Ok(())
    }
}

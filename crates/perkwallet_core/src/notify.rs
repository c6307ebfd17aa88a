//! The reminder-scheduler contract.
//!
//! Delivery belongs to the host's notification center. The core only decides
//! *when* a reminder should fire and tracks the opaque handle of whatever it
//! last asked the scheduler to do, so a stale request can be cancelled before
//! the next one is placed.

use jiff::civil::Date;

use crate::date_math::offset_days;
use crate::model::{Benefit, BenefitId};

/// External local-notification scheduler.
///
/// `schedule` returns an opaque handle on success, or None when the host
/// declined (permissions, past date); scheduling failures are never fatal to
/// the core.
pub trait ReminderScheduler {
    fn schedule(&mut self, benefit_id: BenefitId, fire_on: Date) -> Option<String>;
    fn cancel(&mut self, handle: &str);
}

/// When this benefit's reminder should fire: lead-time days before the
/// period ends. None when reminders are disabled for the benefit.
pub fn reminder_date(benefit: &Benefit) -> Option<Date> {
    let lead = benefit.reminder_lead_days?;
    Some(offset_days(benefit.period_end, -lead))
}

/// Replace whatever was previously scheduled for this benefit with a fresh
/// request for its current period.
pub fn sync_reminder(benefit: &mut Benefit, scheduler: &mut dyn ReminderScheduler) {
    if let Some(handle) = benefit.notification_handle.take() {
        scheduler.cancel(&handle);
    }
    if let Some(fire_on) = reminder_date(benefit) {
        benefit.notification_handle = scheduler.schedule(benefit.benefit_id, fire_on);
    }
}

/// Scheduler that does nothing. Used in tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScheduler;

impl ReminderScheduler for NullScheduler {
    fn schedule(&mut self, _benefit_id: BenefitId, _fire_on: Date) -> Option<String> {
        None
    }

    fn cancel(&mut self, _handle: &str) {}
}

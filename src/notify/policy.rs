use chrono::{Datelike, NaiveDate, Weekday};
use tracing::{debug, error, info};

use crate::{
    config::Config,
    error::{Error, Result},
    hospital::month_assignments,
    roster::Roster,
    schedule::{
        parse::{load_city_schedule, load_netcontrol_schedule},
        reconcile::{assignment_on, city_schedule_covers, reconcile, MonthSchedule},
        CityRecord, NetControlRecord,
    },
    timesheet::{hospital_net_hours, net_time_sheet},
    types::{add_days, month_start, next_month_start, previous_month_start, MonthPrefix},
};

use super::{
    announce::{hospital_announcement, monthly_report, net_control_reminder, net_control_signup_call},
    message::Notifier,
};

/// Days before a month starts during which the signup call goes out.
pub const SIGNUP_LEAD_DAYS: i64 = 10;
/// Day of month after which the signup call targets the next month.
pub const SIGNUP_CUTOVER_DAY: u32 = 15;
/// Days ahead of a net its control station is reminded.
pub const REMINDER_LEAD_DAYS: u64 = 2;
/// Occurrence of Wednesday in the month on which the hospital net runs.
pub const HOSPITAL_NET_WEEK: u32 = 4;

/// Which occurrence of its weekday `date` is within the month (1-based).
pub fn weekday_number(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

/// The first Wednesday strictly after `date`.
pub fn upcoming_wednesday(date: NaiveDate) -> NaiveDate {
    let today = date.weekday().num_days_from_monday();
    let wednesday = Weekday::Wed.num_days_from_monday();
    let mut ahead = (wednesday + 7 - today) % 7;
    if ahead == 0 {
        ahead = 7;
    }
    add_days(date, u64::from(ahead))
}

/// Month the signup call targets, and whether the call is due today.
pub fn signup_window(today: NaiveDate) -> (bool, NaiveDate) {
    let target = if today.day() < SIGNUP_CUTOVER_DAY {
        month_start(today)
    } else {
        next_month_start(today)
    };
    let distance = (target - today).num_days();
    (distance < SIGNUP_LEAD_DAYS, target)
}

/// Scheduled announcement kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Call for net-control volunteers.
    NetSignups,
    /// Reminder to the upcoming net control.
    NetControlReminder,
    /// Monthly time report.
    MonthlyReport,
    /// Hospital net signup announcement.
    HospitalAnnouncement,
}

/// Outcome of one [`Dispatcher::dispatch`] run.
#[derive(Debug, Default)]
pub struct DispatchSummary {
    /// Actions that completed; a signup call with a full schedule counts.
    pub done: Vec<Action>,
    /// Actions that failed, with the error text.
    pub failed: Vec<(Action, String)>,
}

/// Runs the announcement rules against an injected date and notifier.
pub struct Dispatcher<'a> {
    config: &'a Config,
    roster: &'a Roster,
    notifier: &'a mut dyn Notifier,
}

impl<'a> Dispatcher<'a> {
    /// Binds configuration, roster and the delivery adapter.
    pub fn new(config: &'a Config, roster: &'a Roster, notifier: &'a mut dyn Notifier) -> Self {
        Self {
            config,
            roster,
            notifier,
        }
    }

    /// Loads the net-control schedule named in the config.
    pub fn load_netcontrol(&self) -> Result<Vec<NetControlRecord>> {
        load_netcontrol_schedule(&self.config.resolve(&self.config.netcontrol_schedule_file))
    }

    /// Loads the city schedule named in the config.
    pub fn load_cities(&self) -> Result<Vec<CityRecord>> {
        load_city_schedule(&self.config.resolve(&self.config.city_schedule_file))
    }

    /// Everything due on `today`. Schedule load failures abort; a failing
    /// action is logged and the remaining ones still run.
    pub fn dispatch(&mut self, today: NaiveDate) -> Result<DispatchSummary> {
        let net_control = self.load_netcontrol()?;
        let mut summary = DispatchSummary::default();

        let (due, target) = signup_window(today);
        debug!(%today, %target, due, "signup window");
        if due {
            let cities = self.load_cities()?;
            let res = self.call_for_signups(target, &net_control, &cities).map(|_| ());
            record(&mut summary, Action::NetSignups, res);
        }

        if today.weekday() == Weekday::Sun {
            let res = self.remind_net_control(add_days(today, REMINDER_LEAD_DAYS), &net_control);
            record(&mut summary, Action::NetControlReminder, res);
        }

        if today.day() == 1 {
            let res = self.send_monthly_report(previous_month_start(today));
            record(&mut summary, Action::MonthlyReport, res);
        }

        if weekday_number(upcoming_wednesday(today)) == HOSPITAL_NET_WEEK {
            let res = self.send_hospital_announcement(&MonthPrefix::for_month(today));
            record(&mut summary, Action::HospitalAnnouncement, res);
        }

        Ok(summary)
    }

    /// Reconciles `month` and, when positions are open, announces them.
    ///
    /// Refuses to judge a month the city schedule does not cover. The
    /// announcement is skipped with an error log when no mailing list is
    /// configured.
    pub fn call_for_signups(
        &mut self,
        month: NaiveDate,
        net_control: &[NetControlRecord],
        cities: &[CityRecord],
    ) -> Result<MonthSchedule> {
        if !city_schedule_covers(month, cities, self.config.net_cadence_days) {
            return Err(Error::IncompleteCitySchedule { month });
        }
        let schedule = reconcile(month, net_control, cities);
        info!(month = %schedule.month, complete = schedule.complete, "month schedule");
        if !schedule.complete && self.has_mailing_list(Action::NetSignups) {
            let message = net_control_signup_call(self.config, &schedule)?;
            self.notifier.send(&message)?;
        }
        Ok(schedule)
    }

    /// Asks the station scheduled on `date` to confirm.
    pub fn remind_net_control(&mut self, date: NaiveDate, net_control: &[NetControlRecord]) -> Result<()> {
        let record = assignment_on(date, net_control).ok_or(Error::UnassignedDate(date))?;
        let message = net_control_reminder(self.config, self.roster, record)?;
        self.notifier.send(&message)
    }

    /// Sends the hours report for the month starting at `month`.
    pub fn send_monthly_report(&mut self, month: NaiveDate) -> Result<()> {
        let prefix = MonthPrefix::for_month(month);
        let scope = self.config.duplicate_scope;
        let net = net_time_sheet(
            self.roster,
            &self.config.resolve(&self.config.net_log_directory),
            &prefix,
            scope,
        )?;
        let hospital = hospital_net_hours(
            self.roster,
            &self.config.resolve(&self.config.hospital_log_directory),
            &prefix,
            scope,
        )?;
        debug!(net = net.total_hours, hospital, "monthly hours");
        let message = monthly_report(self.config, month, &net, hospital)?;
        self.notifier.send(&message)
    }

    /// Announces the hospital net for `prefix` with current signups.
    ///
    /// Skipped with an error log when no mailing list is configured.
    pub fn send_hospital_announcement(&mut self, prefix: &MonthPrefix) -> Result<()> {
        if !self.has_mailing_list(Action::HospitalAnnouncement) {
            return Ok(());
        }
        let assignments = month_assignments(
            &self.config.resolve(&self.config.hospital_log_directory),
            prefix,
            self.roster,
        )?;
        let message = hospital_announcement(self.config, &assignments)?;
        self.notifier.send(&message)
    }

    fn has_mailing_list(&self, action: Action) -> bool {
        if self.config.mailing_list.is_empty() {
            error!(?action, "mailing list is empty, skipping announcement");
            return false;
        }
        true
    }
}

fn record(summary: &mut DispatchSummary, action: Action, res: Result<()>) {
    match res {
        Ok(()) => summary.done.push(action),
        Err(err) => {
            error!(?action, error = %err, "announcement failed");
            summary.failed.push((action, err.to_string()));
        }
    }
}

use std::fmt::Write;

use chrono::NaiveDate;

use crate::{
    config::Config,
    error::{Error, Result},
    hospital::{signup_table, HospitalAssignments, NET_CONTROL_HOSPITAL},
    roster::Roster,
    schedule::{reconcile::MonthSchedule, NetControlRecord},
    timesheet::TimeSheet,
    types::DISPLAY_DATE_FORMAT,
};

use super::message::Message;

/// Subject tag of every club-wide message.
pub const SUBJECT_TAG: &str = "[SJ-RACES]";

fn mailing_list(config: &Config) -> Result<&str> {
    if config.mailing_list.is_empty() {
        return Err(Error::Config("empty mailing list".to_string()));
    }
    Ok(&config.mailing_list)
}

fn signed(mut body: String, config: &Config) -> String {
    let _ = write!(body, "\n\n{}", config.station.signature);
    body
}

/// Call for net-control volunteers listing the month's current schedule.
pub fn net_control_signup_call(config: &Config, schedule: &MonthSchedule) -> Result<Message> {
    let from = config.require_sender()?;
    let to = mailing_list(config)?;

    let mut body = String::from("Hi,\n\nNet control positions are open.\n\n");
    body.push_str("Here is the schedule right now:\n");
    body.push_str(&schedule.render_table());
    body.push_str(
        "\nSimply respond to this email with your name, callsign and date to signup for a net control position.\n",
    );

    Ok(Message {
        from: from.to_string(),
        to: vec![to.to_string()],
        subject: format!(
            "{SUBJECT_TAG} SJ RACES Net Control for {}",
            schedule.month.format("%b %Y")
        ),
        body: signed(body, config),
        ..Message::default()
    })
}

/// Confirmation request to the station scheduled for `record`.
pub fn net_control_reminder(config: &Config, roster: &Roster, record: &NetControlRecord) -> Result<Message> {
    let from = config.require_sender()?;
    let member = roster
        .get(&record.callsign)
        .filter(|m| !m.email.is_empty())
        .ok_or_else(|| Error::EmptyEmail(record.callsign.clone()))?;
    let date = record.date.format(DISPLAY_DATE_FORMAT);

    let body = format!(
        "Hi {},\n\nThank you for volunteering. Could you please confirm that you are still comfortable running the net on {date}\n\nThanks,",
        member.name
    );
    Ok(Message {
        from: from.to_string(),
        to: vec![member.email.clone()],
        bcc: vec![from.to_string()],
        subject: format!("Net control {date}"),
        body: signed(body, config),
        ..Message::default()
    })
}

/// Monthly hours report for `month`.
pub fn monthly_report(
    config: &Config,
    month: NaiveDate,
    net: &TimeSheet,
    hospital_hours: f64,
) -> Result<Message> {
    let from = config.require_sender()?;
    if config.time_report.main_mail.is_empty() {
        return Err(Error::Config("time-report.main-mail is not set".to_string()));
    }
    let month_name = month.format("%b %Y").to_string();

    let mut body = format!("Hi folks,\n\nHere is net control statistics for {month_name}:\n\n");
    body.push_str(&net.render());
    let _ = write!(
        body,
        "\nHospital Net: {hospital_hours:.3}\n\nTotal Hours: {:.3}\n",
        hospital_hours + net.total_hours
    );

    let cc = if config.time_report.cc_mail.is_empty() {
        Vec::new()
    } else {
        vec![config.time_report.cc_mail.clone()]
    };
    Ok(Message {
        from: from.to_string(),
        to: vec![config.time_report.main_mail.clone()],
        cc,
        bcc: vec![from.to_string()],
        subject: format!("{SUBJECT_TAG} Net report for {month_name}"),
        body: signed(body, config),
    })
}

/// Hospital net signup announcement.
pub fn hospital_announcement(config: &Config, assignments: &HospitalAssignments) -> Result<Message> {
    let from = config.require_sender()?;
    let to = mailing_list(config)?;

    let mut body = String::from("Hi folks,\n\nHospital net is next week.\nPlease sign up for one of the hospitals.\n");
    body.push_str(
        "In order to sign up you need to reply to this email with your callsign and the hospital of choice.\n\n",
    );
    body.push_str(&signup_table(assignments));
    let _ = writeln!(body, "\nNet control is Regional San Jose ({NET_CONTROL_HOSPITAL})");

    Ok(Message {
        from: from.to_string(),
        to: vec![to.to_string()],
        subject: format!("{SUBJECT_TAG} Hospital Net next Wednesday, 7pm"),
        body: signed(body, config),
        ..Message::default()
    })
}

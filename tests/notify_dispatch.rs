use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use netmgr::{
    config::Config,
    error::{Error, Result},
    hospital::{parse_assignments, signup_table, HospitalAssignments},
    notify::{
        message::{Message, Notifier},
        policy::{signup_window, upcoming_wednesday, weekday_number, Action, Dispatcher},
        spool::SpoolNotifier,
    },
    roster::Roster,
    schedule::{CityRecord, NetControlRecord},
    types::{Member, MonthPrefix},
};

#[derive(Default)]
struct RecordingNotifier {
    sent: Vec<Message>,
}

impl Notifier for RecordingNotifier {
    fn send(&mut self, message: &Message) -> Result<()> {
        self.sent.push(message.clone());
        Ok(())
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("date")
}

fn roster() -> Roster {
    Roster::from_members([
        Member::new("Herman", "K4LXF4", "herman@munster.com"),
        Member::new("Grandpa", "W6GPA", ""),
    ])
}

fn config(base: &Path) -> Config {
    let mut config = Config {
        base_dir: Some(base.to_path_buf()),
        mailing_list: "races@example.org".to_string(),
        net_log_directory: PathBuf::from("net"),
        hospital_log_directory: PathBuf::from("hospital"),
        netcontrol_schedule_file: PathBuf::from("nc.txt"),
        city_schedule_file: PathBuf::from("city.txt"),
        ..Config::default()
    };
    config.station.mail.email = "k6abc@example.org".to_string();
    config.station.signature = "73, K6ABC".to_string();
    config.time_report.main_mail = "boss@example.org".to_string();
    config
}

fn april_cities() -> Vec<CityRecord> {
    [2, 9, 16, 23, 30]
        .into_iter()
        .map(|day| CityRecord {
            date: d(2024, 4, day),
            city: "San Jose".to_string(),
        })
        .collect()
}

#[test]
fn weekday_number_counts_weeks_of_the_month() {
    assert_eq!(weekday_number(d(2022, 8, 17)), 3);
    assert_eq!(weekday_number(d(2022, 8, 1)), 1);
    assert_eq!(weekday_number(d(2022, 8, 7)), 1);
    assert_eq!(weekday_number(d(2022, 8, 8)), 2);
    assert_eq!(weekday_number(d(2022, 8, 31)), 5);
}

#[test]
fn upcoming_wednesday_is_strictly_after_today() {
    assert_eq!(upcoming_wednesday(d(2024, 3, 11)), d(2024, 3, 13));
    assert_eq!(upcoming_wednesday(d(2024, 3, 13)), d(2024, 3, 20));
    assert_eq!(upcoming_wednesday(d(2024, 3, 31)), d(2024, 4, 3));
}

#[test]
fn signup_window_opens_ten_days_before_the_month() {
    assert_eq!(signup_window(d(2024, 3, 25)), (true, d(2024, 4, 1)));
    assert_eq!(signup_window(d(2024, 3, 16)), (false, d(2024, 4, 1)));
    assert_eq!(signup_window(d(2024, 3, 5)), (true, d(2024, 3, 1)));
}

#[test]
fn hospital_assignments_map_acronyms_to_members() {
    let roster = roster();
    let res = parse_assignments("gsh k4lxf4\n".as_bytes(), Path::new("h.txt"), &roster).expect("parse");
    assert_eq!(res.len(), 1);
    assert_eq!(res["GSH"].name, "Herman");

    let table = signup_table(&res);
    let first = table.lines().next().expect("line");
    assert_eq!(first, format!("{:<40}K4LXF4", "Good Samaritan Hospital"));
    assert!(table.contains("Valley Medical Center"));
    assert_eq!(table.matches("Available!").count(), 4);

    let err = parse_assignments("GSH N0PE\n".as_bytes(), Path::new("h.txt"), &roster).unwrap_err();
    assert!(matches!(err, Error::UnknownCallsign(ref c) if c == "N0PE"));

    let err = parse_assignments("GSH\n".as_bytes(), Path::new("h.txt"), &roster).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));
}

#[test]
fn signup_call_goes_out_only_for_open_positions() {
    let tmp = TempDir::new().expect("tmp");
    let config = config(tmp.path());
    let roster = roster();
    let mut notifier = RecordingNotifier::default();

    let partial = vec![NetControlRecord {
        date: d(2024, 4, 2),
        callsign: "K4LXF4".to_string(),
    }];
    let schedule = Dispatcher::new(&config, &roster, &mut notifier)
        .call_for_signups(d(2024, 4, 1), &partial, &april_cities())
        .expect("signups");
    assert!(!schedule.complete);
    assert_eq!(notifier.sent.len(), 1);
    let msg = &notifier.sent[0];
    assert_eq!(msg.subject, "[SJ-RACES] SJ RACES Net Control for Apr 2024");
    assert_eq!(msg.to, vec!["races@example.org".to_string()]);
    assert!(msg.body.contains("4/2/2024\tSan Jose\tK4LXF4\n4/9/2024\tSan Jose\t\n"));
    assert!(msg.body.ends_with("73, K6ABC"));

    let full: Vec<_> = april_cities()
        .into_iter()
        .map(|c| NetControlRecord {
            date: c.date,
            callsign: "K4LXF4".to_string(),
        })
        .collect();
    let mut quiet = RecordingNotifier::default();
    let schedule = Dispatcher::new(&config, &roster, &mut quiet)
        .call_for_signups(d(2024, 4, 1), &full, &april_cities())
        .expect("signups");
    assert!(schedule.complete);
    assert!(quiet.sent.is_empty());
}

#[test]
fn uncovered_month_refuses_the_signup_call() {
    let tmp = TempDir::new().expect("tmp");
    let config = config(tmp.path());
    let roster = roster();
    let mut notifier = RecordingNotifier::default();

    let err = Dispatcher::new(&config, &roster, &mut notifier)
        .call_for_signups(d(2024, 4, 1), &[], &april_cities()[..2])
        .unwrap_err();
    assert!(matches!(err, Error::IncompleteCitySchedule { .. }));
    assert!(notifier.sent.is_empty());
}

#[test]
fn reminder_requires_an_assignment_and_an_email() {
    let tmp = TempDir::new().expect("tmp");
    let config = config(tmp.path());
    let roster = roster();
    let schedule = vec![
        NetControlRecord {
            date: d(2024, 3, 5),
            callsign: "K4LXF4".to_string(),
        },
        NetControlRecord {
            date: d(2024, 3, 12),
            callsign: "W6GPA".to_string(),
        },
    ];
    let mut notifier = RecordingNotifier::default();
    let mut dispatcher = Dispatcher::new(&config, &roster, &mut notifier);

    dispatcher.remind_net_control(d(2024, 3, 5), &schedule).expect("remind");
    let err = dispatcher.remind_net_control(d(2024, 3, 12), &schedule).unwrap_err();
    assert_eq!(err.to_string(), "net control W6GPA has empty email");
    let err = dispatcher.remind_net_control(d(2024, 3, 19), &schedule).unwrap_err();
    assert!(matches!(err, Error::UnassignedDate(date) if date == d(2024, 3, 19)));

    assert_eq!(notifier.sent.len(), 1);
    let msg = &notifier.sent[0];
    assert_eq!(msg.to, vec!["herman@munster.com".to_string()]);
    assert_eq!(msg.bcc, vec!["k6abc@example.org".to_string()]);
    assert_eq!(msg.subject, "Net control 3/5/2024");
    assert!(msg.body.starts_with("Hi Herman,"));
}

#[test]
fn monthly_report_combines_net_and_hospital_hours() {
    let tmp = TempDir::new().expect("tmp");
    std::fs::create_dir(tmp.path().join("net")).expect("mkdir");
    std::fs::create_dir(tmp.path().join("hospital")).expect("mkdir");
    std::fs::write(tmp.path().join("net/2024-02-06.txt"), "K4LXF4\nW6GPA\nK4LXF4\n").expect("write");
    std::fs::write(tmp.path().join("hospital/2024-02-28.txt"), "K4LXF4\n").expect("write");

    let config = config(tmp.path());
    let roster = roster();
    let mut notifier = RecordingNotifier::default();
    Dispatcher::new(&config, &roster, &mut notifier)
        .send_monthly_report(d(2024, 2, 1))
        .expect("report");

    let msg = &notifier.sent[0];
    assert_eq!(msg.subject, "[SJ-RACES] Net report for Feb 2024");
    assert_eq!(msg.to, vec!["boss@example.org".to_string()]);
    assert!(msg.cc.is_empty());
    assert!(msg.body.contains("2024-02-06.txt:\t2\t1.417\t0.500\t0.250\t1.417\n"));
    assert!(msg.body.contains("Hospital Net: 0.750\n"));
    assert!(msg.body.contains("Total Hours: 2.167\n"));
}

#[test]
fn announcements_without_a_mailing_list_are_skipped() {
    let tmp = TempDir::new().expect("tmp");
    std::fs::create_dir(tmp.path().join("hospital")).expect("mkdir");
    let mut config = config(tmp.path());
    config.mailing_list.clear();
    let roster = roster();
    let mut notifier = RecordingNotifier::default();
    let mut dispatcher = Dispatcher::new(&config, &roster, &mut notifier);

    dispatcher
        .send_hospital_announcement(&MonthPrefix::parse("2024-03").expect("prefix"))
        .expect("skipped");
    let schedule = dispatcher
        .call_for_signups(d(2024, 4, 1), &[], &april_cities())
        .expect("skipped");
    assert!(!schedule.complete);
    assert!(notifier.sent.is_empty());
}

#[test]
fn dispatch_on_a_sunday_before_month_end() {
    let tmp = TempDir::new().expect("tmp");
    std::fs::write(tmp.path().join("nc.txt"), "4/2/2024\tK4LXF4\n").expect("write");
    let city: String = april_cities()
        .iter()
        .map(|c| format!("{} {}\n", c.date.format("%-m/%-d/%Y"), c.city))
        .collect();
    std::fs::write(tmp.path().join("city.txt"), city).expect("write");

    let config = config(tmp.path());
    let roster = roster();
    let mut notifier = RecordingNotifier::default();
    let summary = Dispatcher::new(&config, &roster, &mut notifier)
        .dispatch(d(2024, 3, 31))
        .expect("dispatch");

    assert_eq!(summary.done, vec![Action::NetSignups, Action::NetControlReminder]);
    assert!(summary.failed.is_empty());
    assert_eq!(notifier.sent.len(), 2);
    assert_eq!(notifier.sent[1].subject, "Net control 4/2/2024");
}

#[test]
fn dispatch_aborts_without_a_schedule() {
    let tmp = TempDir::new().expect("tmp");
    let config = config(tmp.path());
    let roster = roster();
    let mut notifier = RecordingNotifier::default();
    let err = Dispatcher::new(&config, &roster, &mut notifier)
        .dispatch(d(2024, 3, 31))
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn spool_notifier_writes_numbered_messages() {
    let tmp = TempDir::new().expect("tmp");
    let outbox = tmp.path().join("outbox");
    let mut spool = SpoolNotifier::open(&outbox).expect("spool");
    let message = Message {
        from: "k6abc@example.org".to_string(),
        to: vec!["races@example.org".to_string()],
        subject: "[SJ-RACES] Hospital Net next Wednesday, 7pm".to_string(),
        body: "Hi folks,\n".to_string(),
        ..Message::default()
    };
    spool.send(&message).expect("send");

    let path = outbox.join("0001-sj-races-hospital-net-next-wednesday-7pm.eml");
    let text = std::fs::read_to_string(path).expect("read");
    assert!(text.starts_with("From: k6abc@example.org\nTo: races@example.org\nSubject: "));
    assert!(text.ends_with("\n\nHi folks,\n"));

    let mut reopened = SpoolNotifier::open(&outbox).expect("spool");
    reopened.send(&message).expect("send");
    assert!(outbox.join("0002-sj-races-hospital-net-next-wednesday-7pm.eml").exists());

}

#[test]
fn reopened_spool_never_reuses_a_queued_number() {
    let tmp = TempDir::new().expect("tmp");
    let outbox = tmp.path().join("outbox");
    let message = Message {
        from: "k6abc@example.org".to_string(),
        to: vec!["races@example.org".to_string()],
        subject: "[SJ-RACES] SJ RACES Net Control for Apr 2024".to_string(),
        body: "day one\n".to_string(),
        ..Message::default()
    };

    let mut spool = SpoolNotifier::open(&outbox).expect("spool");
    spool.send(&message).expect("send");
    spool
        .send(&Message {
            body: "day two\n".to_string(),
            ..message.clone()
        })
        .expect("send");
    std::fs::remove_file(outbox.join("0001-sj-races-sj-races-net-control-for-apr-2024.eml")).expect("relay");

    let mut reopened = SpoolNotifier::open(&outbox).expect("spool");
    reopened
        .send(&Message {
            body: "day three\n".to_string(),
            ..message.clone()
        })
        .expect("send");

    let day_two = std::fs::read_to_string(outbox.join("0002-sj-races-sj-races-net-control-for-apr-2024.eml"))
        .expect("queued");
    assert!(day_two.ends_with("day two\n"));
    let day_three = std::fs::read_to_string(outbox.join("0003-sj-races-sj-races-net-control-for-apr-2024.eml"))
        .expect("new");
    assert!(day_three.ends_with("day three\n"));
    assert_eq!(std::fs::read_dir(&outbox).expect("dir").count(), 2);
}

#[test]
fn signup_table_lists_every_hospital_as_available_when_empty() {
    let empty: HospitalAssignments = HospitalAssignments::new();
    assert_eq!(signup_table(&empty).matches("Available!").count(), 5);
}

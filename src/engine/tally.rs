use std::fmt::Write;

use crate::checkin::events::ClassifiedEvent;

use super::traits::Aggregator;

/// Printable check-in report with per-section and total counts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TallyReport {
    /// Report text, one line per event plus section summaries.
    pub text: String,
    /// Confirmed members per closed section, in order; empty sections omitted.
    pub sections: Vec<usize>,
    /// Confirmed members across the whole log.
    pub total: usize,
}

/// Builds a [`TallyReport`].
///
/// Members are listed plainly, duplicates as `CALL = ` and unknown
/// callsigns as `CALL - `. A boundary prints `Section count: N` when the
/// section confirmed anyone, then a blank separator.
#[derive(Debug, Default)]
pub struct TallyReporter {
    report: TallyReport,
    section: usize,
}

impl Aggregator for TallyReporter {
    type Output = TallyReport;

    fn observe(&mut self, event: &ClassifiedEvent) {
        let out = &mut self.report.text;
        let _ = match event {
            ClassifiedEvent::Member(call) => {
                self.section += 1;
                self.report.total += 1;
                writeln!(out, "{call}")
            }
            ClassifiedEvent::Duplicate(call) => writeln!(out, "{call} = "),
            ClassifiedEvent::Unknown(call) => writeln!(out, "{call} - "),
            ClassifiedEvent::SectionBoundary if self.section > 0 => {
                self.report.sections.push(self.section);
                let count = std::mem::take(&mut self.section);
                writeln!(out, "Section count: {count}\n")
            }
            ClassifiedEvent::SectionBoundary => writeln!(out),
        };
    }

    fn finish(mut self) -> TallyReport {
        let _ = writeln!(self.report.text, "Confirmed members: {}", self.report.total);
        self.report
    }
}

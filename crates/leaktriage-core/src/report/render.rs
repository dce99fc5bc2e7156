use crate::TOOL_NAME;
use crate::report::model::{LeakVerdict, Report};
use crate::rules::catalog;

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));
    out.push_str(&format!("Log: {}\n", report.log.path));
    out.push_str(&format!(
        "Summary entries: {}\n",
        report.section.entry_count
    ));
    out.push_str(&format!("Verdict: {}\n", report.classification.verdict));

    if report.classification.verdict == LeakVerdict::SuppressedEntraining {
        out.push_str("Suppressed by known entraining leaks:\n");
        for message in &report.buckets.entraining {
            let name = message.rsplit(' ').next().unwrap_or(message);
            match catalog::tracking_bugs(name) {
                Some(bugs) => out.push_str(&format!("  - {name} (bug {bugs})\n")),
                None => out.push_str(&format!("  - {name}\n")),
            }
        }
    }

    out.push_str(&report.classification.report_text);
    out
}

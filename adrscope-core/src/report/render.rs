use crate::report::{AnalysisReport, DeliveryCounts, DeliverySummary};
use crate::spatial::CoordinateBucket;
use owo_colors::OwoColorize;

pub fn render_pretty(report: &AnalysisReport) -> String {
    render(report, Style { color: true })
}

pub fn render_plain(report: &AnalysisReport) -> String {
    render(report, Style { color: false })
}

const CELL_WIDTH: usize = 20;

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Fair,
    Poor,
}

impl Tone {
    fn of(counts: &DeliveryCounts) -> Option<Tone> {
        counts.ratio.map(|ratio| {
            if ratio >= 0.9 {
                Tone::Good
            } else if ratio >= 0.5 {
                Tone::Fair
            } else {
                Tone::Poor
            }
        })
    }
}

/// Colouring is applied to already padded text so escapes never count
/// towards column widths.
#[derive(Clone, Copy)]
struct Style {
    color: bool,
}

impl Style {
    fn heading(self, s: &str) -> String {
        if self.color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn failures(self, n: u64) -> String {
        if self.color && n > 0 {
            n.red().to_string()
        } else {
            n.to_string()
        }
    }

    fn tone(self, text: String, tone: Option<Tone>) -> String {
        match (self.color, tone) {
            (true, Some(Tone::Good)) => text.green().to_string(),
            (true, Some(Tone::Fair)) => text.yellow().to_string(),
            (true, Some(Tone::Poor)) => text.red().to_string(),
            _ => text,
        }
    }
}

fn render(report: &AnalysisReport, style: Style) -> String {
    let mut out = String::new();

    write_header(&mut out, report, style);
    write_delivery(&mut out, report, style);
    write_convergence(&mut out, report, style);
    write_spatial(&mut out, report, style);
    write_devices(&mut out, report, style);

    out
}

fn write_header(out: &mut String, report: &AnalysisReport, style: Style) {
    let correlation = &report.config.correlation;

    out.push_str(&style.heading("ADR Timeline Report"));
    out.push_str("\n===================\n");
    out.push_str(&format!(
        "devices: {} | window: {}s | matching: {:?} | baseline: {}\n",
        report.devices.len(),
        correlation.window_secs,
        correlation.match_policy,
        report.config.baseline
    ));
    out.push_str(&format!(
        "lines: {} | matched: {} | unmatched: {}\n\n",
        report.ingest.total_lines,
        report.ingest.matched.values().sum::<u64>(),
        report.ingest.unmatched_lines
    ));

    write_direction(out, "Uplink:  ", &report.delivery.uplink, style);
    write_direction(out, "Downlink:", &report.delivery.downlink, style);
    out.push('\n');
}

fn write_direction(out: &mut String, label: &str, summary: &DeliverySummary, style: Style) {
    let total = &summary.total;
    out.push_str(&format!(
        "{label} sends {} | ok {} | failed {} | PDR {}\n",
        total.sends,
        total.successes,
        style.failures(total.failures),
        style.tone(ratio_text(total), Tone::of(total))
    ));
}

fn write_delivery(out: &mut String, report: &AnalysisReport, style: Style) {
    out.push_str(&style.heading("Delivery by data rate"));
    out.push('\n');
    out.push_str(&format!(
        "  {:<6} {:<w$} {:<w$}\n",
        "rate",
        "uplink",
        "downlink",
        w = CELL_WIDTH
    ));

    let uplink = &report.delivery.uplink;
    let downlink = &report.delivery.downlink;
    for (up, down) in uplink.by_data_rate.iter().zip(&downlink.by_data_rate) {
        if up.counts.sends == 0 && down.counts.sends == 0 {
            continue;
        }
        out.push_str(&format!(
            "  {:<6} {} {}\n",
            format!("DR{}", up.data_rate),
            cell(&up.counts, style),
            cell(&down.counts, style)
        ));
    }
    out.push('\n');
}

fn ratio_text(counts: &DeliveryCounts) -> String {
    counts
        .ratio
        .map_or_else(|| "-".to_string(), |ratio| format!("{:.1}%", ratio * 100.0))
}

fn cell(counts: &DeliveryCounts, style: Style) -> String {
    let text = if counts.sends == 0 {
        "-".to_string()
    } else {
        format!(
            "{} ({}/{})",
            ratio_text(counts),
            counts.successes,
            counts.sends
        )
    };
    style.tone(format!("{text:<width$}", width = CELL_WIDTH), Tone::of(counts))
}

fn write_convergence(out: &mut String, report: &AnalysisReport, style: Style) {
    let convergence = &report.convergence;
    out.push_str(&style.heading("Convergence"));
    out.push('\n');
    out.push_str(&format!(
        "  settled: {} | never adjusted: {} | mean: {} | last: {}\n\n",
        convergence.converged_devices,
        convergence.unconverged_devices,
        seconds(convergence.mean_secs),
        seconds(convergence.latest_secs)
    ));
}

fn seconds(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |s| format!("{s:.1}s"))
}

fn write_spatial(out: &mut String, report: &AnalysisReport, style: Style) {
    let spatial = &report.spatial;
    let total = spatial.device_count();

    out.push_str(&style.heading("Final settings"));
    out.push('\n');
    if total == 0 {
        out.push_str("  <no devices>\n\n");
        return;
    }

    let buckets: Vec<&CoordinateBucket> = spatial
        .by_data_rate
        .iter()
        .chain(&spatial.dr5_by_tx_power)
        .filter(|bucket| !bucket.is_empty())
        .collect();

    for bucket in buckets {
        let pct = (bucket.len() as f64 / total as f64) * 100.0;
        let bars = ((pct / 5.0).floor() as usize).max(1);
        out.push_str(&format!(
            "  {:<10} {:<20} {:>4} ({:>5.1}%)\n",
            bucket.label,
            "█".repeat(bars),
            bucket.len(),
            pct
        ));
    }
    out.push('\n');
}

fn write_devices(out: &mut String, report: &AnalysisReport, style: Style) {
    out.push_str(&style.heading("Devices"));
    out.push('\n');

    for device in &report.devices {
        let position = device
            .location
            .map_or_else(|| "-".to_string(), |l| format!("({:.1}, {:.1})", l.x, l.y));
        let up = &device.delivery.uplink.total;
        let down = &device.delivery.downlink.total;

        out.push_str(&format!(
            "  #{:<5} {:<20} {:<8} up {}/{} (failed {})  down {}/{} (failed {})  adr {}",
            device.device.0,
            position,
            device.final_setting.to_string(),
            up.successes,
            up.sends,
            style.failures(up.failures),
            down.successes,
            down.sends,
            style.failures(down.failures),
            device.adr_decisions
        ));
        if device.adr_failures > 0 {
            out.push_str(&format!(" ({} failed)", device.adr_failures));
        }
        if let Some(at) = device.convergence_time {
            out.push_str(&format!("  settled {at:.1}s"));
        }
        out.push('\n');
    }
}

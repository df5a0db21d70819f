use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::{AdjustmentList, EfficiencyResult, MonitoringReport, SummaryReport};

/// Writes `value` as pretty JSON, or runs `text` against stdout.
pub fn emit<T, F>(json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let mut output = io::BufWriter::new(io::stdout().lock());
    if json {
        serde_json::to_writer_pretty(&mut output, value).context("failed to serialize json output")?;
        writeln!(output)?;
    } else {
        let writer: &mut dyn Write = &mut output;
        text(writer)?;
    }
    output.flush()?;
    Ok(())
}

pub fn write_efficiency(output: &mut dyn Write, result: &EfficiencyResult) -> io::Result<()> {
    writeln!(
        output,
        "Water Extraction Efficiency: {} ({:.4})",
        result.percentage(),
        result.efficiency
    )
}

pub fn write_monitoring(output: &mut dyn Write, report: &MonitoringReport) -> io::Result<()> {
    writeln!(output, "System Monitoring Report:")?;
    writeln!(output, "  waste volume:  {} liters", report.waste_volume)?;
    writeln!(output, "  energy status: {}", report.energy_status)?;
    writeln!(output, "  filter status: {}", report.filter_status)?;
    writeln!(output, "  efficiency:    {:.4}", report.efficiency)
}

pub fn write_adjustments(output: &mut dyn Write, list: &AdjustmentList) -> io::Result<()> {
    writeln!(output, "Recommended Adjustments:")?;
    for adjustment in &list.adjustments {
        writeln!(output, "  - {adjustment}")?;
    }
    Ok(())
}

pub fn write_summary(output: &mut dyn Write, summary: &SummaryReport) -> io::Result<()> {
    write!(output, "{summary}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnergyStatus;

    #[test]
    fn monitoring_text_lists_every_field() {
        let report = MonitoringReport {
            waste_volume: 1200.0,
            energy_status: EnergyStatus::Low,
            filter_status: "clogged".to_string(),
            efficiency: 0.65,
        };
        let mut buf = Vec::new();
        write_monitoring(&mut buf, &report).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("1200 liters"));
        assert!(text.contains("energy status: low"));
        assert!(text.contains("filter status: clogged"));
        assert!(text.contains("0.6500"));
    }

    #[test]
    fn efficiency_text_shows_percentage() {
        let mut buf = Vec::new();
        write_efficiency(&mut buf, &EfficiencyResult { efficiency: 0.85 }).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("85.00%"));
    }
}

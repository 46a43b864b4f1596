use anyhow::{Context, Result};
use chrono::NaiveDate;

use talentsync::config::ScheduleConfig;

/// Print the slots generated for a date
pub fn calendar(schedule: &ScheduleConfig, date: &str) -> Result<()> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {date}. Expected YYYY-MM-DD"))?;

    let allocator = schedule
        .allocator()
        .context("Invalid schedule configuration")?;
    let calendar = allocator.calendar_for(date);

    println!("Interview slots for {date}");
    println!("{:-<40}", "");
    if !allocator.business_days().is_business_day(date) {
        println!("  (not a business day, no interviews are placed here)");
    }
    for (i, slot) in calendar.iter().enumerate() {
        println!("  {:>2}. {slot}", i + 1);
    }
    println!();
    println!("Total: {} slots", calendar.len());

    Ok(())
}

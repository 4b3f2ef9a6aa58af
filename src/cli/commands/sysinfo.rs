//! Sysinfo, battery and network commands - show host information.

use anyhow::Result;
use colored::Colorize;

use deskmate_cli::system::host::format_hours_minutes;
use deskmate_cli::system::{BatteryInfo, NetworkInfo, SystemInfo, Usage};

use crate::cli::format::OutputFormat;

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Arguments shared by the host information commands.
#[derive(clap::Args)]
pub struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

fn field(label: &str) -> colored::ColoredString {
    format!("{label:<9}").dimmed()
}

fn na() -> colored::ColoredString {
    "N/A".dimmed()
}

fn usage_line(usage: Option<Usage>, unit: f64, suffix: &str) -> String {
    match usage {
        Some(u) => format!(
            "{:.1}{suffix} / {:.1}{suffix} ({:.1}%)",
            u.used as f64 / unit,
            u.total as f64 / unit,
            u.percent()
        ),
        None => na().to_string(),
    }
}

/// Executes the sysinfo command.
pub fn run(args: Args) -> Result<()> {
    let info = SystemInfo::collect();

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "System Information".bold());
    println!("  {}  {} ({})", field("Platform:"), info.os, info.family);
    println!("  {}  {}", field("Machine:"), info.arch);
    println!("  {}  {}", field("Hostname:"), info.hostname);
    println!("{}", "-".repeat(30).dimmed());
    match info.logical_cpus {
        Some(n) => println!("  {}  {}", field("CPUs:"), n),
        None => println!("  {}  {}", field("CPUs:"), na()),
    }
    match info.cpu_usage_percent {
        Some(p) => println!("  {}  {:.1}%", field("CPU:"), p),
        None => println!("  {}  {}", field("CPU:"), na()),
    }
    if let Some([one, five, fifteen]) = info.load_average {
        println!(
            "  {}  {:.2} {:.2} {:.2}",
            field("Load:"),
            one,
            five,
            fifteen
        );
    }
    println!("  {}  {}", field("Memory:"), usage_line(info.memory, MIB, "MB"));
    println!("  {}  {}", field("Disk:"), usage_line(info.disk, GIB, "GB"));
    if let Some(dir) = &info.current_dir {
        println!("  {}  {}", field("Cwd:"), dir.display());
    }
    Ok(())
}

/// Executes the battery command.
pub fn battery(args: Args) -> Result<()> {
    let battery = BatteryInfo::collect();

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&battery)?);
        return Ok(());
    }

    let Some(battery) = battery else {
        println!("{}", "No battery found".dimmed());
        return Ok(());
    };

    println!("{} {}", "Battery".bold(), battery.name.dimmed());
    match battery.percent {
        Some(p) => println!("  {}  {}%", field("Charge:"), p),
        None => println!("  {}  {}", field("Charge:"), na()),
    }
    println!("  {}  {}", field("Status:"), battery.status);
    println!(
        "  {}  {}",
        field("Plugged:"),
        if battery.plugged { "yes" } else { "no" }
    );
    match battery.seconds_left {
        Some(secs) => println!("  {}  {}", field("Left:"), format_hours_minutes(secs)),
        None => println!("  {}  {}", field("Left:"), na()),
    }
    Ok(())
}

/// Executes the network command.
pub fn network(args: Args) -> Result<()> {
    let info = NetworkInfo::collect();

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let show = |value: Option<String>| value.unwrap_or_else(|| na().to_string());

    println!("{}", "Network".bold());
    println!("  {}  {}", field("Interface:"), show(info.interface));
    println!(
        "  {}  {}",
        field("IP:"),
        show(info.ip_address.map(|ip| ip.to_string()))
    );
    println!(
        "  {}  {}",
        field("Gateway:"),
        show(info.gateway.map(|ip| ip.to_string()))
    );
    Ok(())
}

//! Resource readings: CPU, memory, disk, battery and network.
//!
//! Linux readings come from `/proc` and `/sys`; disk and interface
//! addresses go through `libc` on every Unix. Anything a platform can't
//! report is `None` and shows as "N/A".

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

/// How long CPU counters are sampled for a usage reading.
pub const CPU_SAMPLE: Duration = Duration::from_millis(250);

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Used and total bytes of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub used: u64,
    pub total: u64,
}

impl Usage {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f64 / self.total as f64 * 100.0
    }
}

/// Memory usage from a `/proc/meminfo` listing.
///
/// Used memory is `MemTotal - MemAvailable`.
pub fn parse_meminfo(content: &str) -> Option<Usage> {
    let field = |name: &str| -> Option<u64> {
        content
            .lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(':'))
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|kb| kb.parse::<u64>().ok())
            .map(|kb| kb * 1024)
    };

    let total = field("MemTotal")?;
    let available = field("MemAvailable").or_else(|| field("MemFree"))?;
    Some(Usage {
        used: total.saturating_sub(available),
        total,
    })
}

pub fn memory_usage() -> Option<Usage> {
    let content = fs::read_to_string("/proc/meminfo").ok()?;
    parse_meminfo(&content)
}

/// Used and total space of the filesystem holding `path`.
#[cfg(unix)]
pub fn disk_usage(path: &Path) -> Option<Usage> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;
    // SAFETY: statvfs is plain old data; an all-zero value is valid.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is NUL-terminated and stat is a valid out pointer.
    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) } != 0 {
        return None;
    }

    let block = u64::from(stat.f_frsize);
    let blocks = u64::from(stat.f_blocks);
    let free = u64::from(stat.f_bfree);
    Some(Usage {
        used: blocks.saturating_sub(free) * block,
        total: blocks * block,
    })
}

#[cfg(not(unix))]
pub fn disk_usage(_path: &Path) -> Option<Usage> {
    None
}

/// Idle and total jiffies from the aggregate `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimes {
    pub idle: u64,
    pub total: u64,
}

pub fn parse_cpu_times(content: &str) -> Option<CpuTimes> {
    let line = content.lines().find(|l| l.starts_with("cpu "))?;
    let values: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map(|v| v.parse().ok())
        .collect::<Option<_>>()?;
    if values.len() < 4 {
        return None;
    }

    // idle + iowait
    let idle = values[3] + values.get(4).copied().unwrap_or(0);
    Some(CpuTimes {
        idle,
        total: values.iter().sum(),
    })
}

/// Busy share of the time between two samples, in percent.
pub fn cpu_percent(before: CpuTimes, after: CpuTimes) -> Option<f64> {
    let total = after.total.checked_sub(before.total)?;
    let idle = after.idle.checked_sub(before.idle)?;
    if total == 0 {
        return None;
    }
    Some(total.saturating_sub(idle) as f64 / total as f64 * 100.0)
}

/// Samples CPU usage over [`CPU_SAMPLE`].
pub fn cpu_usage() -> Option<f64> {
    let read = || {
        fs::read_to_string("/proc/stat")
            .ok()
            .and_then(|s| parse_cpu_times(&s))
    };
    let before = read()?;
    std::thread::sleep(CPU_SAMPLE);
    cpu_percent(before, read()?)
}

/// State of the first battery found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatteryInfo {
    pub name: String,
    pub percent: Option<u8>,
    /// As reported by the kernel: Charging, Discharging, Full, ...
    pub status: String,
    pub plugged: bool,
    /// Estimated seconds until empty, only while discharging.
    pub seconds_left: Option<u64>,
}

impl BatteryInfo {
    pub fn collect() -> Option<Self> {
        Self::read_from(Path::new(POWER_SUPPLY_DIR))
    }

    /// Reads a sysfs `power_supply` directory.
    pub fn read_from(root: &Path) -> Option<Self> {
        let mut supplies: Vec<_> = fs::read_dir(root)
            .ok()?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        supplies.sort();

        let mains_online = supplies.iter().any(|dir| {
            read_value(dir, "type").as_deref() == Some("Mains")
                && read_value(dir, "online").as_deref() == Some("1")
        });

        let dir = supplies
            .iter()
            .find(|dir| read_value(dir, "type").as_deref() == Some("Battery"))?;

        let status = read_value(dir, "status").unwrap_or_else(|| "Unknown".to_string());
        let plugged = mains_online || matches!(status.as_str(), "Charging" | "Full");
        let seconds_left = if status == "Discharging" {
            seconds_left(dir)
        } else {
            None
        };

        Some(Self {
            name: dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            percent: read_number(dir, "capacity").and_then(|n| u8::try_from(n).ok()),
            status,
            plugged,
            seconds_left,
        })
    }
}

fn seconds_left(dir: &Path) -> Option<u64> {
    let (remaining, rate) = match (read_number(dir, "energy_now"), read_number(dir, "power_now")) {
        (Some(energy), Some(power)) => (energy, power),
        _ => (read_number(dir, "charge_now")?, read_number(dir, "current_now")?),
    };
    if rate == 0 {
        return None;
    }
    Some(remaining * 3600 / rate)
}

fn read_value(dir: &Path, name: &str) -> Option<String> {
    fs::read_to_string(dir.join(name))
        .ok()
        .map(|s| s.trim().to_string())
}

fn read_number(dir: &Path, name: &str) -> Option<u64> {
    read_value(dir, name)?.parse().ok()
}

/// Formats a duration as `1h 05m`.
pub fn format_hours_minutes(seconds: u64) -> String {
    let minutes = seconds / 60;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Local network details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub interface: Option<String>,
    pub ip_address: Option<Ipv4Addr>,
    pub gateway: Option<Ipv4Addr>,
}

impl NetworkInfo {
    pub fn collect() -> Self {
        let (interface, ip_address) = match first_ipv4() {
            Some((name, ip)) => (Some(name), Some(ip)),
            None => (None, None),
        };
        let gateway = fs::read_to_string("/proc/net/route")
            .ok()
            .and_then(|s| parse_default_gateway(&s));

        Self {
            interface,
            ip_address,
            gateway,
        }
    }
}

/// Default IPv4 gateway from a `/proc/net/route` table.
///
/// Addresses in that table are the raw in-kernel values printed as hex,
/// so the bytes are already in network order when taken natively.
pub fn parse_default_gateway(content: &str) -> Option<Ipv4Addr> {
    content.lines().skip(1).find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [_, "00000000", gateway, ..] if *gateway != "00000000" => {
                let raw = u32::from_str_radix(gateway, 16).ok()?;
                Some(Ipv4Addr::from(raw.to_ne_bytes()))
            }
            _ => None,
        }
    })
}

/// First non-loopback interface with an IPv4 address.
#[cfg(unix)]
fn first_ipv4() -> Option<(String, Ipv4Addr)> {
    use std::ffi::CStr;

    let mut head: *mut libc::ifaddrs = std::ptr::null_mut();
    // SAFETY: head is a valid out pointer; the list is freed below.
    if unsafe { libc::getifaddrs(&mut head) } != 0 {
        return None;
    }

    let mut found = None;
    let mut cursor = head;
    while !cursor.is_null() {
        // SAFETY: cursor is a node of the list returned by getifaddrs.
        let ifa = unsafe { &*cursor };
        cursor = ifa.ifa_next;

        if ifa.ifa_addr.is_null() {
            continue;
        }
        // SAFETY: ifa_addr is non-null and points at a sockaddr.
        let family = unsafe { (*ifa.ifa_addr).sa_family };
        if i32::from(family) != libc::AF_INET {
            continue;
        }

        // SAFETY: AF_INET addresses are sockaddr_in.
        let addr = unsafe { &*(ifa.ifa_addr as *const libc::sockaddr_in) };
        let ip = Ipv4Addr::from(u32::from_be(addr.sin_addr.s_addr));
        if ip.is_loopback() {
            continue;
        }

        // SAFETY: ifa_name is a NUL-terminated string owned by the list.
        let name = unsafe { CStr::from_ptr(ifa.ifa_name) }
            .to_string_lossy()
            .into_owned();
        found = Some((name, ip));
        break;
    }

    // SAFETY: head came from getifaddrs and is freed exactly once.
    unsafe { libc::freeifaddrs(head) };
    found
}

#[cfg(not(unix))]
fn first_ipv4() -> Option<(String, Ipv4Addr)> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_meminfo() {
        let content = "MemTotal:        8000000 kB\n\
                       MemFree:          500000 kB\n\
                       MemAvailable:    2000000 kB\n";

        let usage = parse_meminfo(content).unwrap();

        assert_eq!(usage.total, 8_000_000 * 1024);
        assert_eq!(usage.used, 6_000_000 * 1024);
        assert!((usage.percent() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_meminfo_missing_total() {
        assert_eq!(parse_meminfo("MemFree: 10 kB\n"), None);
    }

    #[test]
    fn test_cpu_percent_between_samples() {
        let before = parse_cpu_times("cpu  100 0 100 700 100 0 0 0\ncpu0 1 2 3 4\n").unwrap();
        let after = parse_cpu_times("cpu  150 0 150 750 150 0 0 0\n").unwrap();

        assert_eq!(before, CpuTimes { idle: 800, total: 1000 });
        assert_eq!(cpu_percent(before, after), Some(50.0));
        assert_eq!(cpu_percent(after, after), None);
    }

    #[test]
    fn test_disk_usage_of_temp_dir() {
        let dir = tempdir().unwrap();
        if let Some(usage) = disk_usage(dir.path()) {
            assert!(usage.used <= usage.total);
        }
    }

    fn write_supply(root: &Path, name: &str, files: &[(&str, &str)]) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for (file, value) in files {
            fs::write(dir.join(file), format!("{value}\n")).unwrap();
        }
    }

    #[test]
    fn test_battery_discharging_with_estimate() {
        let root = tempdir().unwrap();
        write_supply(root.path(), "AC", &[("type", "Mains"), ("online", "0")]);
        write_supply(
            root.path(),
            "BAT0",
            &[
                ("type", "Battery"),
                ("status", "Discharging"),
                ("capacity", "64"),
                ("energy_now", "30000000"),
                ("power_now", "10000000"),
            ],
        );

        let battery = BatteryInfo::read_from(root.path()).unwrap();

        assert_eq!(battery.name, "BAT0");
        assert_eq!(battery.percent, Some(64));
        assert!(!battery.plugged);
        assert_eq!(battery.seconds_left, Some(3 * 3600));
    }

    #[test]
    fn test_battery_charging_has_no_estimate() {
        let root = tempdir().unwrap();
        write_supply(root.path(), "AC", &[("type", "Mains"), ("online", "1")]);
        write_supply(
            root.path(),
            "BAT1",
            &[("type", "Battery"), ("status", "Charging"), ("capacity", "90")],
        );

        let battery = BatteryInfo::read_from(root.path()).unwrap();

        assert!(battery.plugged);
        assert_eq!(battery.status, "Charging");
        assert_eq!(battery.seconds_left, None);
    }

    #[test]
    fn test_no_battery() {
        let root = tempdir().unwrap();
        write_supply(root.path(), "AC", &[("type", "Mains"), ("online", "1")]);

        assert_eq!(BatteryInfo::read_from(root.path()), None);
        assert_eq!(BatteryInfo::read_from(&root.path().join("missing")), None);
    }

    #[test]
    fn test_format_hours_minutes() {
        assert_eq!(format_hours_minutes(3 * 3600 + 5 * 60 + 59), "3h 05m");
        assert_eq!(format_hours_minutes(59), "0h 00m");
    }

    #[test]
    fn test_parse_default_gateway() {
        let gateway = u32::from_ne_bytes([192, 168, 1, 1]);
        let table = format!(
            "Iface\tDestination\tGateway \tFlags\n\
             eth0\t0000A8C0\t00000000\t0001\n\
             eth0\t00000000\t{gateway:08X}\t0003\n"
        );

        assert_eq!(
            parse_default_gateway(&table),
            Some(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert_eq!(parse_default_gateway("Iface\tDestination\tGateway\n"), None);
    }
}

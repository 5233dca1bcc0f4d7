//! Point-in-time metric sampling using sysinfo and direct /proc access.

use crate::error::{Result, SystemError};
use crate::metrics::{data::*, traits::MetricsProvider};
use std::fs;
use std::time::Duration;
use sysinfo::{Networks, System};
use tracing::{debug, warn};

/// Bytes per sector as reported by /proc/diskstats, independent of hardware.
const DISKSTATS_SECTOR_SIZE: u64 = 512;

/// The blocking window used to measure overall CPU usage on this platform.
pub fn default_cpu_window() -> Duration {
    let window = if cfg!(windows) {
        Duration::from_millis(500)
    } else {
        Duration::from_secs(1)
    };
    window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)
}

/// Samples CPU, memory, disk and network readings.
///
/// Each accessor is independent: a failure reading one facet is logged and
/// reported as absence, never as an error for the whole snapshot.
pub struct MetricsSampler {
    system: System,
    networks: Networks,
    cpu_window: Duration,
}

impl MetricsSampler {
    /// Create a new sampler with the platform's default CPU window.
    pub fn new() -> Self {
        let mut system = System::new();
        // Baseline for the first usage delta.
        system.refresh_cpu_usage();
        let networks = Networks::new_with_refreshed_list();

        Self {
            system,
            networks,
            cpu_window: default_cpu_window(),
        }
    }

    /// Override the CPU sample window.
    pub fn with_cpu_window(mut self, window: Duration) -> Self {
        self.cpu_window = window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        self
    }

    /// The CPU sample window in use.
    pub fn cpu_window(&self) -> Duration {
        self.cpu_window
    }

    /// Sample overall and per-core CPU usage, blocking for the sample window.
    pub async fn sample_cpu(&mut self) -> Option<CpuReading> {
        self.system.refresh_cpu_usage();
        tokio::time::sleep(self.cpu_window).await;
        sampled("cpu", self.collect_cpu())
    }

    /// Sample memory and swap usage.
    pub fn sample_memory(&mut self) -> Option<MemoryReading> {
        sampled("memory", self.collect_memory())
    }

    /// Sample cumulative disk I/O counters.
    pub fn sample_disk_io(&mut self) -> Option<DiskIoReading> {
        sampled("disk_io", read_disk_io())
    }

    /// Sample cumulative network I/O counters.
    pub fn sample_network_io(&mut self) -> Option<NetworkIoReading> {
        sampled("network_io", self.collect_network_io())
    }

    fn collect_cpu(&mut self) -> Result<CpuReading> {
        self.system.refresh_cpu_usage();
        self.system.refresh_cpu_frequency();

        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return Err(SystemError::system_error("No CPU information available"));
        }

        let core_percents: Vec<f32> = cpus.iter().map(|cpu| cpu.cpu_usage()).collect();
        let overall_percent = self.system.global_cpu_usage();

        let frequency = match cpus[0].frequency() {
            0 => None,
            mhz => {
                let (min_mhz, max_mhz) = read_cpu_frequency_limits();
                Some(CpuFrequency {
                    current_mhz: mhz as f64,
                    min_mhz,
                    max_mhz,
                })
            }
        };

        Ok(CpuReading {
            overall_percent,
            core_percents,
            frequency,
        })
    }

    fn collect_memory(&mut self) -> Result<MemoryReading> {
        self.system.refresh_memory();

        let total_bytes = self.system.total_memory();
        if total_bytes == 0 {
            return Err(SystemError::system_error("Total memory reported as zero"));
        }
        let used_bytes = self.system.used_memory();

        let swap_total = self.system.total_swap();
        let swap = (swap_total > 0).then(|| {
            let used = self.system.used_swap();
            SwapReading {
                total_bytes: swap_total,
                used_bytes: used,
                percent: percent_of(used, swap_total),
            }
        });

        Ok(MemoryReading {
            total_bytes,
            used_bytes,
            available_bytes: self.system.available_memory(),
            percent: percent_of(used_bytes, total_bytes),
            swap,
        })
    }

    fn collect_network_io(&mut self) -> Result<NetworkIoReading> {
        self.networks.refresh_list();

        if self.networks.iter().next().is_none() {
            return Err(SystemError::system_error("No network interfaces reported"));
        }

        let mut reading = self.networks.iter().fold(
            NetworkIoReading::default(),
            |mut acc, (_, data)| {
                acc.bytes_sent += data.total_transmitted();
                acc.bytes_received += data.total_received();
                acc.packets_sent += data.total_packets_transmitted();
                acc.packets_received += data.total_packets_received();
                acc.errors_out += data.total_errors_on_transmitted();
                acc.errors_in += data.total_errors_on_received();
                acc
            },
        );

        match read_network_drops() {
            Ok((drops_in, drops_out)) => {
                reading.drops_in = Some(drops_in);
                reading.drops_out = Some(drops_out);
            }
            Err(err) if err.is_unsupported() => {}
            Err(err) => debug!("Network drop counters unavailable: {}", err),
        }

        Ok(reading)
    }
}

impl Default for MetricsSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsProvider for MetricsSampler {
    async fn collect_snapshot(&mut self) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::new();
        snapshot.cpu = self.sample_cpu().await;
        snapshot.memory = self.sample_memory();
        snapshot.disk_io = self.sample_disk_io();
        snapshot.network_io = self.sample_network_io();
        snapshot
    }
}

/// Convert a facet result into an optional reading, logging the failure.
fn sampled<T>(facet: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(reading) => Some(reading),
        Err(err) if err.is_unsupported() => {
            debug!(facet, "Facet not available: {}", err);
            None
        }
        Err(err) => {
            warn!(facet, "Error sampling facet: {}", err);
            None
        }
    }
}

/// Read min/max CPU frequency limits in MHz from sysfs.
fn read_cpu_frequency_limits() -> (Option<f64>, Option<f64>) {
    let read_mhz = |file: &str| -> Option<f64> {
        let path = format!("/sys/devices/system/cpu/cpu0/cpufreq/{}", file);
        let khz = fs::read_to_string(path).ok()?.trim().parse::<u64>().ok()?;
        Some(khz as f64 / 1000.0) // kHz to MHz
    };

    (read_mhz("cpuinfo_min_freq"), read_mhz("cpuinfo_max_freq"))
}

#[cfg(target_os = "linux")]
fn read_disk_io() -> Result<DiskIoReading> {
    let diskstats = fs::read_to_string("/proc/diskstats")?;
    parse_diskstats(&diskstats, |device| {
        std::path::Path::new("/sys/block").join(device).exists()
    })
}

#[cfg(not(target_os = "linux"))]
fn read_disk_io() -> Result<DiskIoReading> {
    Err(SystemError::unsupported("disk I/O counters"))
}

#[cfg(target_os = "linux")]
fn read_network_drops() -> Result<(u64, u64)> {
    let netdev = fs::read_to_string("/proc/net/dev")?;
    parse_net_dev_drops(&netdev)
}

#[cfg(not(target_os = "linux"))]
fn read_network_drops() -> Result<(u64, u64)> {
    Err(SystemError::unsupported("network drop counters"))
}

/// Sum cumulative counters over whole storage devices in /proc/diskstats.
///
/// `is_whole_disk` decides whether a device name is a disk rather than a
/// partition; loop, ram and device-mapper entries are always skipped.
/// A malformed count or byte column is an error; a malformed time column
/// leaves that time total unknown.
pub fn parse_diskstats(
    contents: &str,
    is_whole_disk: impl Fn(&str) -> bool,
) -> Result<DiskIoReading> {
    let mut reading = DiskIoReading {
        read_time_ms: Some(0),
        write_time_ms: Some(0),
        ..Default::default()
    };
    let mut devices = 0;

    for line in contents.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 14 {
            continue;
        }

        let device = parts[2];
        if device.starts_with("loop") || device.starts_with("ram") || device.starts_with("dm-") {
            continue;
        }
        if !is_whole_disk(device) {
            continue;
        }

        let field = |idx: usize| -> Result<u64> {
            parts[idx].parse::<u64>().map_err(|e| {
                SystemError::parse_error(format!("diskstats field {} for {}: {}", idx, device, e))
            })
        };

        reading.read_count += field(3)?;
        reading.read_bytes += field(5)? * DISKSTATS_SECTOR_SIZE;
        reading.read_time_ms = reading.read_time_ms.zip(field(6).ok()).map(|(t, v)| t + v);
        reading.write_count += field(7)?;
        reading.write_bytes += field(9)? * DISKSTATS_SECTOR_SIZE;
        reading.write_time_ms = reading.write_time_ms.zip(field(10).ok()).map(|(t, v)| t + v);
        devices += 1;
    }

    if devices == 0 {
        return Err(SystemError::parse_error("No block devices in /proc/diskstats"));
    }

    Ok(reading)
}

/// Sum inbound and outbound drop counters across all interfaces in /proc/net/dev.
pub fn parse_net_dev_drops(contents: &str) -> Result<(u64, u64)> {
    let mut drops_in = 0;
    let mut drops_out = 0;
    let mut interfaces = 0;

    // Two header lines precede the per-interface rows.
    for line in contents.lines().skip(2) {
        let Some((interface, counters)) = line.split_once(':') else {
            continue;
        };
        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() < 16 {
            continue;
        }

        let parse = |idx: usize| -> Result<u64> {
            fields[idx].parse::<u64>().map_err(|e| {
                SystemError::parse_error(format!("net/dev field {} for {}: {}", idx, interface.trim(), e))
            })
        };

        drops_in += parse(3)?;
        drops_out += parse(11)?;
        interfaces += 1;
    }

    if interfaces == 0 {
        return Err(SystemError::parse_error("No interfaces in /proc/net/dev"));
    }

    Ok((drops_in, drops_out))
}

/// Collect general host information.
pub fn host_info() -> HostInfo {
    let system = System::new_with_specifics(
        sysinfo::RefreshKind::new().with_cpu(sysinfo::CpuRefreshKind::new()),
    );

    let processor = system
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    HostInfo {
        os_name: os_name(),
        os_version: System::os_version().unwrap_or_else(|| "unknown".to_string()),
        kernel_version: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
        hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
        architecture: std::env::consts::ARCH.to_string(),
        processor,
    }
}

/// The operating system name as reported by sysinfo.
pub fn os_name() -> String {
    System::name().unwrap_or_else(|| std::env::consts::OS.to_string())
}

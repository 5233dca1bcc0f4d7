//! Human-readable formatting and presence variant construction.

use crate::metrics::data::{CpuReading, DiskIoReading, MemoryReading, NetworkIoReading};
use serde::{Deserialize, Serialize};

const BYTE_UNITS: [&str; 5] = ["", "K", "M", "G", "T"];
const TOP_BYTE_UNIT: &str = "P";

/// Swap usage must exceed this percentage before the swap variant is offered.
pub const SWAP_VARIANT_THRESHOLD_PERCENT: f32 = 5.0;

/// Format a byte count with binary units and one decimal place.
///
/// Values of 1024 P and above stay in P.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in BYTE_UNITS {
        if value < 1024.0 {
            return format!("{:.1} {}B", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} {}B", value, TOP_BYTE_UNIT)
}

/// Which pair of facets a variant summarises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantKind {
    CpuRam,
    DiskNet,
    CpuDisk,
    RamNet,
    Frequency,
    Swap,
}

/// One candidate two-line presence summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub kind: VariantKind,
    pub title: String,
    pub subtitle: String,
}

impl Variant {
    fn new(kind: VariantKind, title: String, subtitle: String) -> Self {
        Self {
            kind,
            title,
            subtitle,
        }
    }
}

/// Display settings shared by every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show_os: bool,
    pub os_name: String,
}

impl DisplayOptions {
    pub fn new(show_os: bool, os_name: impl Into<String>) -> Self {
        Self {
            show_os,
            os_name: os_name.into(),
        }
    }

    fn os_suffix(&self) -> String {
        if self.show_os {
            format!(" | {}", self.os_name)
        } else {
            String::new()
        }
    }
}

fn cpu_line(cpu: &CpuReading) -> String {
    format!("CPU: {:.1}%", cpu.overall_percent)
}

fn ram_line(memory: &MemoryReading) -> String {
    format!(
        "RAM: {:.1}% ({}/{})",
        memory.percent,
        format_bytes(memory.used_bytes),
        format_bytes(memory.total_bytes)
    )
}

fn disk_line(disk: &DiskIoReading) -> String {
    format!(
        "Disk R/W: {}/{}",
        format_bytes(disk.read_bytes),
        format_bytes(disk.write_bytes)
    )
}

fn net_line(net: &NetworkIoReading) -> String {
    format!(
        "Net S/R: {}/{}",
        format_bytes(net.bytes_sent),
        format_bytes(net.bytes_received)
    )
}

/// Build the ordered pool of variants the available facets support.
///
/// CPU and memory are required; every other variant is added only when its
/// inputs are present. The frequency variant also requires `show_os`.
pub fn presence_variants(
    cpu: &CpuReading,
    memory: &MemoryReading,
    disk: Option<&DiskIoReading>,
    net: Option<&NetworkIoReading>,
    display: &DisplayOptions,
) -> Vec<Variant> {
    let os = display.os_suffix();
    let mut variants = vec![Variant::new(
        VariantKind::CpuRam,
        format!("{}{}", cpu_line(cpu), os),
        ram_line(memory),
    )];

    if let (Some(disk), Some(net)) = (disk, net) {
        variants.push(Variant::new(
            VariantKind::DiskNet,
            format!("{}{}", disk_line(disk), os),
            net_line(net),
        ));
    }

    if let Some(disk) = disk {
        variants.push(Variant::new(
            VariantKind::CpuDisk,
            format!("{}{}", cpu_line(cpu), os),
            disk_line(disk),
        ));
    }

    if let Some(net) = net {
        variants.push(Variant::new(
            VariantKind::RamNet,
            format!("{}{}", ram_line(memory), os),
            net_line(net),
        ));
    }

    if let (Some(freq), true) = (&cpu.frequency, display.show_os) {
        variants.push(Variant::new(
            VariantKind::Frequency,
            format!("{} @ {:.0}MHz", cpu_line(cpu), freq.current_mhz),
            format!("RAM: {:.1}% | {}", memory.percent, display.os_name),
        ));
    }

    if let Some(swap) = &memory.swap {
        if swap.total_bytes > 0 && swap.percent > SWAP_VARIANT_THRESHOLD_PERCENT {
            variants.push(Variant::new(
                VariantKind::Swap,
                format!(
                    "RAM: {:.1}% | Swap: {:.1}%{}",
                    memory.percent, swap.percent, os
                ),
                format!(
                    "Physical: {}/{}",
                    format_bytes(memory.used_bytes),
                    format_bytes(memory.total_bytes)
                ),
            ));
        }
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::data::{CpuFrequency, SwapReading};

    const GIB: u64 = 1024 * 1024 * 1024;

    fn cpu() -> CpuReading {
        CpuReading {
            overall_percent: 42.3,
            core_percents: vec![40.0, 44.6],
            frequency: None,
        }
    }

    fn memory() -> MemoryReading {
        MemoryReading {
            total_bytes: 16 * GIB,
            used_bytes: 4 * GIB,
            available_bytes: 12 * GIB,
            percent: 25.0,
            swap: None,
        }
    }

    fn disk() -> DiskIoReading {
        DiskIoReading {
            read_bytes: 1536,
            write_bytes: 2 * 1024 * 1024,
            ..Default::default()
        }
    }

    fn net() -> NetworkIoReading {
        NetworkIoReading {
            bytes_sent: 512,
            bytes_received: 3 * GIB,
            ..Default::default()
        }
    }

    fn kinds(variants: &[Variant]) -> Vec<VariantKind> {
        variants.iter().map(|v| v.kind).collect()
    }

    fn hidden_os() -> DisplayOptions {
        DisplayOptions::new(false, "Linux")
    }

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(0), "0.0 B");
        assert_eq!(format_bytes(1023), "1023.0 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(4 * GIB), "4.0 GB");
        assert_eq!(format_bytes(1024 * GIB), "1.0 TB");
        assert_eq!(format_bytes(1024 * 1024 * GIB), "1.0 PB");
    }

    #[test]
    fn test_format_bytes_stays_in_petabytes() {
        let pib = 1024 * 1024 * GIB;
        assert_eq!(format_bytes(2048 * pib), "2048.0 PB");
        assert_eq!(format_bytes(u64::MAX), "16384.0 PB");
    }

    #[test]
    fn test_format_bytes_boundary_rounding() {
        // Just below 1 MiB stays in KB even though it rounds to 1024.0
        assert_eq!(format_bytes(1024 * 1024 - 1), "1024.0 KB");
    }

    #[test]
    fn test_ram_line_example() {
        let variants = presence_variants(&cpu(), &memory(), None, None, &hidden_os());
        assert_eq!(variants[0].title, "CPU: 42.3%");
        assert_eq!(variants[0].subtitle, "RAM: 25.0% (4.0 GB/16.0 GB)");
    }

    #[test]
    fn test_pool_grows_with_facets() {
        let display = hidden_os();
        let base = presence_variants(&cpu(), &memory(), None, None, &display);
        assert_eq!(kinds(&base), vec![VariantKind::CpuRam]);

        let with_disk = presence_variants(&cpu(), &memory(), Some(&disk()), None, &display);
        assert_eq!(kinds(&with_disk), vec![VariantKind::CpuRam, VariantKind::CpuDisk]);

        let with_net = presence_variants(&cpu(), &memory(), None, Some(&net()), &display);
        assert_eq!(kinds(&with_net), vec![VariantKind::CpuRam, VariantKind::RamNet]);

        let with_both = presence_variants(&cpu(), &memory(), Some(&disk()), Some(&net()), &display);
        assert_eq!(
            kinds(&with_both),
            vec![
                VariantKind::CpuRam,
                VariantKind::DiskNet,
                VariantKind::CpuDisk,
                VariantKind::RamNet,
            ]
        );
        assert_eq!(with_both[1].title, "Disk R/W: 1.5 KB/2.0 MB");
        assert_eq!(with_both[1].subtitle, "Net S/R: 512.0 B/3.0 GB");
    }

    #[test]
    fn test_os_suffix_on_titles() {
        let display = DisplayOptions::new(true, "Linux");
        let variants = presence_variants(&cpu(), &memory(), Some(&disk()), Some(&net()), &display);

        for variant in &variants {
            assert!(variant.title.ends_with(" | Linux"), "{}", variant.title);
            assert!(!variant.subtitle.contains("Linux"));
        }
    }

    #[test]
    fn test_frequency_variant_requires_show_os() {
        let mut clocked = cpu();
        clocked.frequency = Some(CpuFrequency {
            current_mhz: 3400.4,
            min_mhz: None,
            max_mhz: None,
        });

        let hidden = presence_variants(&clocked, &memory(), None, None, &hidden_os());
        assert!(!kinds(&hidden).contains(&VariantKind::Frequency));

        let shown = presence_variants(&clocked, &memory(), None, None, &DisplayOptions::new(true, "Linux"));
        let freq = shown.iter().find(|v| v.kind == VariantKind::Frequency).unwrap();
        assert_eq!(freq.title, "CPU: 42.3% @ 3400MHz");
        assert_eq!(freq.subtitle, "RAM: 25.0% | Linux");

        let no_freq = presence_variants(&cpu(), &memory(), None, None, &DisplayOptions::new(true, "Linux"));
        assert!(!kinds(&no_freq).contains(&VariantKind::Frequency));
    }

    #[test]
    fn test_swap_variant_threshold_is_strict() {
        let with_swap = |percent: f32| {
            let mut memory = memory();
            memory.swap = Some(SwapReading {
                total_bytes: 2 * GIB,
                used_bytes: 0,
                percent,
            });
            presence_variants(&cpu(), &memory, None, None, &hidden_os())
        };

        assert!(!kinds(&with_swap(5.0)).contains(&VariantKind::Swap));
        assert!(!kinds(&with_swap(0.0)).contains(&VariantKind::Swap));

        let variants = with_swap(5.1);
        let swap = variants.iter().find(|v| v.kind == VariantKind::Swap).unwrap();
        assert_eq!(swap.title, "RAM: 25.0% | Swap: 5.1%");
        assert_eq!(swap.subtitle, "Physical: 4.0 GB/16.0 GB");
    }

    #[test]
    fn test_swap_variant_needs_swap_capacity() {
        let mut memory = memory();
        memory.swap = Some(SwapReading {
            total_bytes: 0,
            used_bytes: 0,
            percent: 50.0,
        });
        let variants = presence_variants(&cpu(), &memory, None, None, &hidden_os());
        assert_eq!(kinds(&variants), vec![VariantKind::CpuRam]);
    }
}

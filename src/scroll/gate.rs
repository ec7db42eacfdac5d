//! One-time capability gate for the animation layer.
//!
//! Evaluated once at startup. A closed gate means the animator is never
//! constructed: wheel input degrades to instant jumps and no frames are
//! ever scheduled — indistinguishable from plain native scrolling.

use std::env;

/// Answers the questions the gate asks about the host environment.
pub trait CapabilityProbe {
    /// User prefers reduced motion (config, CLI, or environment).
    fn prefers_reduced_motion(&self) -> bool;
    /// Total memory in GiB, when known.
    fn memory_gib(&self) -> Option<f64>;
    /// Usable core count, when known.
    fn cpu_cores(&self) -> Option<usize>;
    /// A precise pointing device can reach us (mouse capture is on).
    fn has_fine_pointer(&self) -> bool;
}

/// Why the gate closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableReason {
    ReducedMotion,
    LowMemory,
    SingleCore,
    CoarsePointer,
}

impl DisableReason {
    pub fn describe(self) -> &'static str {
        match self {
            DisableReason::ReducedMotion => "reduced motion requested",
            DisableReason::LowMemory => "low memory",
            DisableReason::SingleCore => "single CPU core",
            DisableReason::CoarsePointer => "no fine pointer",
        }
    }
}

/// Outcome of the one-time gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Enabled,
    Disabled(DisableReason),
}

impl GateDecision {
    pub fn is_enabled(self) -> bool {
        matches!(self, GateDecision::Enabled)
    }
}

/// Memory floor for the animation layer, in GiB.
const MIN_MEMORY_GIB: f64 = 2.0;

/// Decide once whether smooth scrolling should run. Checks are ordered
/// and the first failing one names the reason. Unknown memory/core hints
/// pass — only a confirmed constraint closes the gate.
pub fn evaluate(probe: &dyn CapabilityProbe) -> GateDecision {
    if probe.prefers_reduced_motion() {
        return GateDecision::Disabled(DisableReason::ReducedMotion);
    }
    if let Some(gib) = probe.memory_gib() {
        if gib < MIN_MEMORY_GIB {
            return GateDecision::Disabled(DisableReason::LowMemory);
        }
    }
    if let Some(cores) = probe.cpu_cores() {
        if cores <= 1 {
            return GateDecision::Disabled(DisableReason::SingleCore);
        }
    }
    if !probe.has_fine_pointer() {
        return GateDecision::Disabled(DisableReason::CoarsePointer);
    }
    GateDecision::Enabled
}

/// Probe backed by the real process environment.
pub struct SystemProbe {
    reduce_motion: bool,
    mouse_enabled: bool,
}

impl SystemProbe {
    /// `reduce_motion` folds in the config-file and CLI overrides;
    /// `mouse_enabled` mirrors whether mouse capture will be requested.
    pub fn new(reduce_motion: bool, mouse_enabled: bool) -> Self {
        Self {
            reduce_motion,
            mouse_enabled,
        }
    }
}

impl CapabilityProbe for SystemProbe {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduce_motion || env_truthy("GLIDE_REDUCE_MOTION")
    }

    fn memory_gib(&self) -> Option<f64> {
        total_memory_gib()
    }

    fn cpu_cores(&self) -> Option<usize> {
        std::thread::available_parallelism().ok().map(|n| n.get())
    }

    fn has_fine_pointer(&self) -> bool {
        // Wheel and drag events only exist while capture is on.
        self.mouse_enabled
    }
}

fn env_truthy(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// `MemTotal` out of `/proc/meminfo`, in GiB. Linux-shaped; other
/// platforms and parse failures report unknown.
#[cfg(unix)]
fn total_memory_gib() -> Option<f64> {
    let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
    let line = meminfo.lines().find(|l| l.starts_with("MemTotal:"))?;
    let kib: f64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib / (1024.0 * 1024.0))
}

#[cfg(not(unix))]
fn total_memory_gib() -> Option<f64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeProbe {
        reduced: bool,
        memory: Option<f64>,
        cores: Option<usize>,
        fine_pointer: bool,
    }

    impl Default for FakeProbe {
        fn default() -> Self {
            Self {
                reduced: false,
                memory: Some(8.0),
                cores: Some(8),
                fine_pointer: true,
            }
        }
    }

    impl CapabilityProbe for FakeProbe {
        fn prefers_reduced_motion(&self) -> bool {
            self.reduced
        }
        fn memory_gib(&self) -> Option<f64> {
            self.memory
        }
        fn cpu_cores(&self) -> Option<usize> {
            self.cores
        }
        fn has_fine_pointer(&self) -> bool {
            self.fine_pointer
        }
    }

    #[test]
    fn capable_host_enables_smoothing() {
        assert_eq!(evaluate(&FakeProbe::default()), GateDecision::Enabled);
    }

    #[test]
    fn reduced_motion_closes_the_gate_first() {
        let probe = FakeProbe {
            reduced: true,
            memory: Some(0.5),
            ..FakeProbe::default()
        };
        assert_eq!(
            evaluate(&probe),
            GateDecision::Disabled(DisableReason::ReducedMotion)
        );
    }

    #[test]
    fn low_memory_closes_the_gate() {
        let probe = FakeProbe {
            memory: Some(1.5),
            ..FakeProbe::default()
        };
        assert_eq!(
            evaluate(&probe),
            GateDecision::Disabled(DisableReason::LowMemory)
        );
    }

    #[test]
    fn single_core_closes_the_gate() {
        let probe = FakeProbe {
            cores: Some(1),
            ..FakeProbe::default()
        };
        assert_eq!(
            evaluate(&probe),
            GateDecision::Disabled(DisableReason::SingleCore)
        );
    }

    #[test]
    fn missing_pointer_closes_the_gate() {
        let probe = FakeProbe {
            fine_pointer: false,
            ..FakeProbe::default()
        };
        assert_eq!(
            evaluate(&probe),
            GateDecision::Disabled(DisableReason::CoarsePointer)
        );
    }

    #[test]
    fn unknown_hints_pass() {
        let probe = FakeProbe {
            memory: None,
            cores: None,
            ..FakeProbe::default()
        };
        assert_eq!(evaluate(&probe), GateDecision::Enabled);
    }

    #[test]
    fn threshold_values_pass() {
        let probe = FakeProbe {
            memory: Some(2.0),
            cores: Some(2),
            ..FakeProbe::default()
        };
        assert_eq!(evaluate(&probe), GateDecision::Enabled);
    }
}

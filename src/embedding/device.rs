use candle_core::Device;
use tracing::{debug, info, warn};

use super::error::EmbeddingError;

/// Forces CPU inference even when a GPU backend is compiled in.
pub const ENV_FORCE_CPU: &str = "VERDICT_FORCE_CPU";

type Probe = (&'static str, fn() -> candle_core::Result<Device>);

/// GPU backends compiled into this build, in preference order.
fn gpu_probes() -> Vec<Probe> {
    #[allow(unused_mut)]
    let mut probes: Vec<Probe> = Vec::new();
    #[cfg(feature = "metal")]
    probes.push(("metal", || Device::new_metal(0)));
    #[cfg(feature = "cuda")]
    probes.push(("cuda", || Device::new_cuda(0)));
    probes
}

fn force_cpu() -> bool {
    std::env::var(ENV_FORCE_CPU)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Picks the compute device shared by the sentence encoder and the cross-encoder.
///
/// Never fails today: an unusable GPU degrades to CPU with a warning.
pub fn select_device() -> Result<Device, EmbeddingError> {
    if force_cpu() {
        debug!(env = ENV_FORCE_CPU, "CPU inference forced");
        return Ok(Device::Cpu);
    }

    let probes = gpu_probes();
    if probes.is_empty() {
        debug!("No GPU backend compiled, using CPU for model inference");
        return Ok(Device::Cpu);
    }

    let mut failures = Vec::with_capacity(probes.len());
    for (name, probe) in probes {
        match probe() {
            Ok(device) => {
                info!(backend = name, "Using GPU for model inference");
                return Ok(device);
            }
            Err(e) => {
                warn!(backend = name, error = %e, "GPU backend unavailable");
                failures.push(format!("{name}: {e}"));
            }
        }
    }

    warn!(reason = %failures.join("; "), "Using CPU device for model inference");
    Ok(Device::Cpu)
}

use candle_core::Device;
use tracing::{debug, warn};

/// Picks the first usable accelerator enabled by cargo features, else the CPU.
///
/// Accelerator init failures are logged and skipped; the CPU is always available.
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            debug!("Using Metal device for embeddings");
            return device;
        }
        Err(e) => warn!(error = %e, "Metal device unavailable"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            debug!("Using CUDA device for embeddings");
            return device;
        }
        Err(e) => warn!(error = %e, "CUDA device unavailable"),
    }

    if cfg!(any(feature = "metal", feature = "cuda")) {
        warn!("Falling back to CPU device for embeddings");
    } else {
        debug!("No GPU backend compiled, using CPU device for embeddings");
    }

    Device::Cpu
}

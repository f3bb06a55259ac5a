use candle_core::Device;
use tracing::{debug, warn};

/// Picks the compute device for the encoders: Metal, then CUDA, then CPU.
///
/// GPU backends are only tried when the matching cargo feature is compiled in. A failing
/// GPU never aborts startup; the encoders are small enough to run on CPU.
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                tracing::info!("Encoders using Metal");
                return device;
            }
            Err(e) => warn!(error = %e, "Metal unavailable"),
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                tracing::info!("Encoders using CUDA");
                return device;
            }
            Err(e) => warn!(error = %e, "CUDA unavailable"),
        }
    }

    if cfg!(any(feature = "metal", feature = "cuda")) {
        warn!("No GPU device available, encoders falling back to CPU");
    } else {
        debug!("No GPU backend compiled, encoders using CPU");
    }

    Device::Cpu
}

use tracing::{debug, info, warn};

use super::types::{ImageUnavailable, Runner};

/// Make sure `image` is present in local image storage, pulling it on a miss.
///
/// Only exit statuses are consulted. A runtime that cannot be spawned counts
/// as a failed step. The pull is attempted exactly once.
pub fn ensure_image(runner: &impl Runner, image: &str) -> Result<(), ImageUnavailable> {
    if succeeded(runner, &["inspect", "--type=image", image]) {
        debug!(image, "image present locally");
        return Ok(());
    }

    info!(image, "image not found locally, pulling");
    if succeeded(runner, &["pull", image]) {
        return Ok(());
    }

    warn!(image, "image pull failed");
    Err(ImageUnavailable(image.to_string()))
}

fn succeeded(runner: &impl Runner, args: &[&str]) -> bool {
    match runner.status(args) {
        Ok(success) => success,
        Err(err) => {
            warn!(subcommand = args[0], error = %err, "container runtime failed to start");
            false
        }
    }
}

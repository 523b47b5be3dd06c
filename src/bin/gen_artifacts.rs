//! Writes the deterministic demo artifact pair into the model directory.
//!
//! Stand-in for the offline training run: lets the service start `Ready`
//! locally without real fitted artifacts. Honors `SEHAT_MODEL_DIR`.

use anyhow::Context;

use sehat::infrastructure::artifacts::{demo, fs_store};
use sehat::settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    let (scaler, forest) = demo::demo_pair();

    let scaler_path = settings.model_dir.join(fs_store::SCALER_FILENAME);
    fs_store::write_artifact(&scaler_path, &scaler)
        .with_context(|| format!("writing {}", scaler_path.display()))?;

    let model_path = settings.model_dir.join(fs_store::MODEL_FILENAME);
    fs_store::write_artifact(&model_path, &forest)
        .with_context(|| format!("writing {}", model_path.display()))?;

    println!(
        "wrote demo artifacts ({} features, {} trees) to {}",
        forest.n_features,
        forest.trees.len(),
        settings.model_dir.display()
    );

    Ok(())
}

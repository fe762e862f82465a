use argh::FromArgs;
use std::path::PathBuf;

use sfmview_3d::export::assemble_document;
use sfmview_3d::io::colmap::read_reconstruction_bin;

#[derive(FromArgs)]
/// Export a COLMAP sparse reconstruction to a reconstruction.json document.
struct Args {
    /// path to the sparse reconstruction directory (cameras.bin, images.bin, points3D.bin)
    #[argh(option, short = 's')]
    sparse_dir: PathBuf,

    /// path of the output JSON document
    #[argh(option, short = 'o', default = "PathBuf::from(\"reconstruction.json\")")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // decode the three binary tables
    let reconstruction = read_reconstruction_bin(&args.sparse_dir)?;
    log::info!(
        "Loaded {} cameras, {} images, {} 3D points",
        reconstruction.cameras.len(),
        reconstruction.images.len(),
        reconstruction.points.len()
    );

    // derive the poses and flatten everything into the export document
    let document = assemble_document(
        &reconstruction.cameras,
        &reconstruction.images,
        &reconstruction.points,
    );

    let cloud = document.to_pointcloud();
    if !cloud.is_empty() {
        log::info!(
            "Scene bounds: {:?} to {:?}",
            cloud.min_bound(),
            cloud.max_bound()
        );
    }

    document.write_json(&args.output)?;
    log::info!(
        "Saved {} with {} points and {} cameras",
        args.output.display(),
        document.points.len(),
        document.cameras.len()
    );

    Ok(())
}

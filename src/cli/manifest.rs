use super::Context;
use bagit::core::BagResult;
use bagit::{AlgorithmSelector, Bag, Manifests};

pub fn run(ctx: &Context, algorithm: Option<String>) -> BagResult<()> {
    let selector: AlgorithmSelector = match algorithm {
        Some(name) => name.parse()?,
        None => ctx.config.selector()?,
    };

    let manifests = Manifests::with_config(&ctx.bag, &ctx.config);
    manifests.manifest(selector)?;

    let payload = ctx.bag.payload_files()?;
    println!("✓ Wrote {} manifest(s) for {} payload file(s)", selector, payload.len());
    for file in manifests.manifest_files()? {
        if let Some(name) = file.file_name() {
            println!("  {}", name.to_string_lossy());
        }
    }

    Ok(())
}

use super::Context;
use bagit::core::{BagError, BagResult};
use bagit::{Bag, Manifests};

pub fn run(ctx: &Context) -> BagResult<()> {
    let manifests = Manifests::with_config(&ctx.bag, &ctx.config);

    println!("Verifying bag at {}...", ctx.bag.bag_root().display());

    let result = manifests.check()?;

    for skipped in &result.skipped {
        println!("  ⚠️  Skipped {} (unknown algorithm)", skipped.display());
    }

    if result.is_success() {
        println!("✓ Bag is fixed");
        println!("  {} record(s) verified", result.verified.len());
    } else {
        println!("❌ Fixity check failed");
        println!("  {} record(s) verified", result.verified.len());
        println!("  {} record(s) failed", result.failed.len());

        for failure in &result.failed {
            let manifest = failure
                .manifest
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("  ❌ {} [{}]: {}", failure.path, manifest, failure.reason);
        }

        return Err(BagError::NotFixed(result.failed.len()));
    }

    Ok(())
}

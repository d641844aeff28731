use super::{print_tracked, Context};
use bagit::core::BagResult;
use bagit::{Bag, Manifests};

pub fn run(ctx: &Context) -> BagResult<()> {
    let tracked = Manifests::with_config(&ctx.bag, &ctx.config).tagmanifest()?;

    println!("✓ Regenerated tag manifests");
    print_tracked(ctx.bag.bag_root(), &tracked);
    Ok(())
}

use super::{print_tracked, Context};
use bagit::core::BagResult;
use bagit::{Bag, Manifests, TagFileSource};
use std::path::Path;

pub fn add(ctx: &Context, path: &Path, from: Option<&Path>) -> BagResult<()> {
    let source = match from {
        Some(src) => TagFileSource::CopyFrom(src),
        None => TagFileSource::Existing,
    };
    let tracked = Manifests::with_config(&ctx.bag, &ctx.config).add_tag_file(path, source)?;

    println!("✓ Added tag file {}", path.display());
    print_tracked(ctx.bag.bag_root(), &tracked);
    Ok(())
}

pub fn remove(ctx: &Context, path: &Path) -> BagResult<()> {
    let tracked = Manifests::with_config(&ctx.bag, &ctx.config).remove_tag_file(path)?;

    println!("✓ Removed tag file {} from the tag manifests", path.display());
    print_tracked(ctx.bag.bag_root(), &tracked);
    Ok(())
}

pub fn delete(ctx: &Context, path: &Path) -> BagResult<()> {
    let tracked = Manifests::with_config(&ctx.bag, &ctx.config).delete_tag_file(path)?;

    println!("✓ Deleted tag file {}", path.display());
    print_tracked(ctx.bag.bag_root(), &tracked);
    Ok(())
}

//! Performance benchmarks for bagit

use bagit::manifest::codec;
use bagit::manifest::digest::{digest_file_all, Algorithm};
use bagit::{AlgorithmSelector, DirectoryBag, Manifests};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;
use tempfile::TempDir;

fn benchmark_digest_large_file(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("payload.bin");
    let data: Vec<u8> = (0..8 * 1024 * 1024u32).map(|i| (i % 253) as u8).collect();
    fs::write(&path, data).unwrap();

    c.bench_function("digest_8mib_sha1_md5", |b| {
        b.iter(|| {
            digest_file_all(black_box(&[Algorithm::Sha1, Algorithm::Md5]), &path).unwrap();
        })
    });
}

fn benchmark_path_encoding(c: &mut Criterion) {
    c.bench_function("encode_path", |b| {
        b.iter(|| {
            codec::encode(black_box("data/some/deeply/nested/dir/with\r\nbreaks/file name.txt"));
        })
    });
}

fn benchmark_manifest_generation(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("data")).unwrap();
    for i in 0..200 {
        fs::write(root.join("data").join(format!("file-{}.txt", i)), format!("content {}", i)).unwrap();
    }
    fs::write(root.join("bagit.txt"), "BagIt-Version: 0.97\n").unwrap();
    fs::write(root.join("bag-info.txt"), "Bagging-Date: 2026-10-16\n").unwrap();
    let bag = DirectoryBag::new(root);

    c.bench_function("manifest_200_files", |b| {
        b.iter(|| {
            Manifests::new(&bag).manifest(AlgorithmSelector::Default).unwrap();
        })
    });

    c.bench_function("fixity_200_files", |b| {
        b.iter(|| {
            assert!(Manifests::new(&bag).is_fixed());
        })
    });
}

criterion_group!(
    benches,
    benchmark_digest_large_file,
    benchmark_path_encoding,
    benchmark_manifest_generation
);
criterion_main!(benches);

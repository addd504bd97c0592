//! Benchmarks for `ServiceRegistry` URL dispatch.
//!
//! Measures the cost of link pattern matching per link family and of the
//! full first-match-wins scan across the registry.
//!
//! Run with: `cargo bench --bench router_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipex::services::bandcamp::{BandcampChannelLinks, BandcampPlaylistLinks, BandcampStreamLinks};
use pipex::{LinkHandlerFactory, ServiceRegistry};

// ---------------------------------------------------------------------------
// URL datasets
// ---------------------------------------------------------------------------

const TRACK_URLS: &[&str] = &[
    "https://macbenson.bandcamp.com/track/thunder",
    "http://zachbensonarchive.bandcamp.com/track/results-of-boredom-2",
    "https://MACBENSON.BANDCAMP.COM/track/collapse?from=embed",
];

const ALBUM_URLS: &[&str] = &[
    "https://macbenson.bandcamp.com/album/coming-of-age",
    "https://billwurtz.bandcamp.com/album/high-enough",
    "https://zachjohnson1.bandcamp.com/album/endless#lyrics",
];

const ARTIST_URLS: &[&str] = &[
    "https://macbenson.bandcamp.com/",
    "https://macbenson.bandcamp.com/music",
    "https://zachjohnson1.bandcamp.com/releases",
];

/// URLs that should NOT match any service.
const NON_MATCHING_URLS: &[&str] = &[
    "https://example.com/page",
    "https://en.wikipedia.org/wiki/Rust_(programming_language)",
    "https://docs.rs/url/latest/url/",
    "https://soundcloud.com/someone/a-track",
    "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
    "not a url at all",
];

/// URLs with patterns that could cause false positives.
const EDGE_CASE_URLS: &[&str] = &[
    "https://bandcamp.com/track/x",                 // No artist subdomain
    "https://daily.bandcamp.com/album/feature",     // Editorial, not an artist
    "https://macbenson.bandcamp.com.evil.test/track/x", // Lookalike host
    "https://example.com/album/coming-of-age",      // Right path, wrong host
    "ftp://macbenson.bandcamp.com/track/thunder",   // Wrong scheme
];

// ---------------------------------------------------------------------------
// Individual link family benchmarks
// ---------------------------------------------------------------------------

fn bench_family(c: &mut Criterion, name: &str, factory: &dyn LinkHandlerFactory, hits: &[&str]) {
    let mut group = c.benchmark_group(name);

    group.bench_function("hit", |b| {
        b.iter(|| {
            for url in hits {
                black_box(factory.accepts(black_box(url)));
            }
        });
    });

    group.bench_function("miss", |b| {
        b.iter(|| {
            for url in NON_MATCHING_URLS {
                black_box(factory.accepts(black_box(url)));
            }
        });
    });

    group.finish();
}

fn bench_track_links(c: &mut Criterion) {
    bench_family(c, "links_bandcamp_track", &BandcampStreamLinks, TRACK_URLS);
}

fn bench_album_links(c: &mut Criterion) {
    bench_family(c, "links_bandcamp_album", &BandcampPlaylistLinks, ALBUM_URLS);
}

fn bench_artist_links(c: &mut Criterion) {
    bench_family(c, "links_bandcamp_artist", &BandcampChannelLinks, ARTIST_URLS);
}

// ---------------------------------------------------------------------------
// Full registry dispatch
// ---------------------------------------------------------------------------

fn bench_registry_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    let registry = ServiceRegistry::builtin();

    // Worst case: URL matches no service, every family of every service checked
    group.bench_function("full_miss_scan", |b| {
        b.iter(|| {
            for url in NON_MATCHING_URLS {
                black_box(registry.service_by_url(black_box(url)).is_ok());
            }
        });
    });

    // Mixed workload: some hits, some misses
    let mixed_urls: Vec<&str> = TRACK_URLS
        .iter()
        .chain(ALBUM_URLS.iter())
        .chain(NON_MATCHING_URLS.iter())
        .chain(EDGE_CASE_URLS.iter())
        .copied()
        .collect();

    group.bench_function("mixed_workload", |b| {
        b.iter(|| {
            let mut matches = 0u32;
            for url in &mixed_urls {
                if registry.classify(black_box(url)).is_ok() {
                    matches += 1;
                }
            }
            black_box(matches)
        });
    });

    group.bench_function("from_url", |b| {
        b.iter(|| {
            for url in ALBUM_URLS {
                black_box(BandcampPlaylistLinks.from_url(black_box(url)).is_ok());
            }
        });
    });

    group.finish();
}

fn bench_registry_creation(c: &mut Criterion) {
    c.bench_function("registry_builtin", |b| {
        b.iter(|| black_box(ServiceRegistry::builtin()));
    });
}

criterion_group!(
    benches,
    bench_track_links,
    bench_album_links,
    bench_artist_links,
    bench_registry_dispatch,
    bench_registry_creation,
);

criterion_main!(benches);

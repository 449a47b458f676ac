use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urlbuf::{
    encoding::{table::*, *},
    Url,
};

criterion_group!(
    benches,
    bench_enc,
    bench_dec,
    bench_validate,
    bench_parse,
    bench_set_host,
    bench_set_fragment,
);
criterion_main!(benches);

fn bench_enc(c: &mut Criterion) {
    c.bench_function("enc", |b| {
        b.iter(|| {
            let s = "te😃a 测1`~!@试#$%st^&+=";
            let _ = black_box(encode(black_box(s), QUERY));
        })
    });
}

fn bench_dec(c: &mut Criterion) {
    let estr = EStr::new("te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=").unwrap();
    c.bench_function("dec", |b| {
        b.iter(|| {
            let _ = black_box(black_box(estr).decode());
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    c.bench_function("validate", |b| {
        b.iter(|| {
            let s = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!%40%E8%AF%95%23%24%25st%5E%26%2B%3D";
            let _ = black_box(validate(black_box(s), QUERY));
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| {
            let s = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";
            let _ = black_box(Url::parse(black_box(s)));
        })
    });
}

fn bench_set_host(c: &mut Criterion) {
    let url = Url::parse("https://user@example.com/search?q=rust#fragment").unwrap();
    c.bench_function("set_host", |b| {
        b.iter(|| {
            let mut url = url.clone();
            url.set_host(black_box("a-longer-host.example.org")).unwrap();
            black_box(url)
        })
    });
}

fn bench_set_fragment(c: &mut Criterion) {
    let url = Url::parse("https://user@example.com/search?q=rust#fragment").unwrap();
    c.bench_function("set_fragment", |b| {
        b.iter(|| {
            let mut url = url.clone();
            url.set_fragment(black_box("other")).unwrap();
            black_box(url)
        })
    });
}

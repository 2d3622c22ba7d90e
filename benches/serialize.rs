use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http_exchange::parse::request_from_buffer;
use http_exchange::{Response, StatusCode, WireWriter};

const SAMPLE: &[u8] = b"GET /accounts/7/movements?verbose=1 HTTP/1.1\r\nHost: localhost\r\nUser-Agent: curl/8.5.0\r\nAccept: */*\r\n\r\n";

fn bench_request_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_build");
    let remote = "127.0.0.1:4321".parse().unwrap();

    group.bench_function(BenchmarkId::new("from_buffer", "sample request"), |c| {
        c.iter(|| request_from_buffer(black_box(SAMPLE), remote))
    });
}

fn bench_response_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_write");

    group.bench_function(BenchmarkId::new("write", "json response"), |c| {
        c.iter(|| {
            let mut response = Response::with_mime_type(
                "application/json",
                &br#"{"total":-9098,"limite":100000}"#[..],
                StatusCode::Ok,
            );
            response.add_header("Connection", "keep-alive");
            let mut writer = WireWriter::new(Vec::with_capacity(256));
            response.write(&mut writer);
            black_box(writer.into_inner())
        })
    });
}

criterion_group!(request_build, bench_request_build);
criterion_group!(response_write, bench_response_write);

criterion_main!(request_build, response_write);

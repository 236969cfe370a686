//
// Copyright 2019-2026 The Mudlink Authors. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for the telnet scanner and engine

use bytes::BytesMut;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mudlink_telnetcodec::{
    CharacterEncoding, EngineSettings, TelnetCodec, TelnetEngine, TelnetFrame, TelnetHost,
    TelnetOption,
};
use tokio_util::codec::{Decoder, Encoder};

struct NullHost;

impl TelnetHost for NullHost {
    fn send_raw_data(&mut self, _data: &[u8]) {}
    fn receive_data(&mut self, _data: &[u8], _go_ahead: bool) {}
    fn character_encoding(&self) -> CharacterEncoding {
        CharacterEncoding::default()
    }
}

fn bench_decode_plain_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_plain_data");

    for size in [100usize, 1000, 10000] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let data: Vec<u8> = (0..size).map(|i| (i % 94 + 32) as u8).collect();
            let mut codec = TelnetCodec::new();

            b.iter(|| {
                let mut src = BytesMut::from(&data[..]);
                while let Some(frame) = codec.decode(&mut src).unwrap() {
                    black_box(frame);
                }
            });
        });
    }

    group.finish();
}

fn bench_decode_escaped_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_escaped_data");
    group.throughput(Throughput::Bytes(2000));

    group.bench_function("all_iac", |b| {
        let data = [0xFFu8; 2000]; // 1000 escaped data bytes
        let mut codec = TelnetCodec::new();

        b.iter(|| {
            let mut src = BytesMut::from(&data[..]);
            while let Some(frame) = codec.decode(&mut src).unwrap() {
                black_box(frame);
            }
        });
    });

    group.finish();
}

fn bench_encode_escaped_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_escaped_payload");

    for size in [100usize, 1000] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            // every fourth byte is IAC
            let data: Vec<u8> = (0..size)
                .map(|i| if i % 4 == 0 { 0xFF } else { b'a' })
                .collect();
            let mut codec = TelnetCodec::new();
            let mut dst = BytesMut::with_capacity(size * 2);

            b.iter(|| {
                dst.clear();
                codec.encode(black_box(&data[..]), &mut dst).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_encode_subnegotiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_subnegotiation");

    group.bench_function("gmcp_payload", |b| {
        let payload = BytesMut::from(&b"Char.Vitals {\"hp\":100,\"maxhp\":120}"[..]);
        let mut codec = TelnetCodec::new();
        let mut dst = BytesMut::with_capacity(64);

        b.iter(|| {
            dst.clear();
            codec
                .encode(
                    black_box(TelnetFrame::Subnegotiate(
                        TelnetOption::Gmcp,
                        payload.clone(),
                    )),
                    &mut dst,
                )
                .unwrap();
        });
    });

    group.finish();
}

fn bench_engine_on_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_on_read");

    // a realistic server burst: text, a negotiation, a prompt with GA
    let mut data = Vec::new();
    for _ in 0..20 {
        data.extend_from_slice(b"You see a troll lumbering towards you.\r\n");
    }
    data.extend_from_slice(&[0xFF, 0xFB, 0x03]); // IAC WILL SUPPRESS_GA
    data.extend_from_slice(b"> ");
    data.extend_from_slice(&[0xFF, 0xF9]); // IAC GA
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("mixed_session_traffic", |b| {
        let mut host = NullHost;
        b.iter(|| {
            let mut engine = TelnetEngine::new(EngineSettings::default());
            engine.on_read(&mut host, black_box(&data)).unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_plain_data,
    bench_decode_escaped_data,
    bench_encode_escaped_payload,
    bench_encode_subnegotiation,
    bench_engine_on_read,
);
criterion_main!(benches);

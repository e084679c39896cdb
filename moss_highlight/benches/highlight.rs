use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use moss_highlight::{highlight, BlockCommentScan, HighlightPreferences, Highlighter};

const SAMPLE: &str = r#"# Sieve of Eratosthenes
sub primes(n)
  a = list(1..n)
  for i in 2..n do
    if a[i] then
      for j in 2*i..n: i do a[j] = false end
    end
  end
  return a.filter(|x| x!=null)
end

/* entity heavy: x &lt; y &amp;&amp; y &gt; z */
s = "unterminated
"#;

fn bench_highlight(c: &mut Criterion) {
    let source = SAMPLE.repeat(64);
    let mut group = c.benchmark_group("highlight");
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("contiguous", |b| b.iter(|| highlight(black_box(&source))));

    let legacy = HighlightPreferences::default().with_block_comment_scan(BlockCommentScan::Legacy);
    group.bench_function("legacy", |b| {
        b.iter(|| moss_highlight::highlight_with_preferences(black_box(&source), &legacy))
    });

    group.bench_function("with_metrics", |b| {
        let mut highlighter = Highlighter::new();
        b.iter(|| highlighter.highlight(black_box(&source)))
    });

    group.finish();
}

criterion_group!(benches, bench_highlight);
criterion_main!(benches);

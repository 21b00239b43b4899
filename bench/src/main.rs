use social_graph_core::{GraphBuilder, GraphStore, PersonId};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let person_count: i64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: social-graph-bench [mode] [person_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  scalefree   Preferential attachment (a few very popular people)");
        println!("  smallworld  Watts-Strogatz ring of acquaintances + shortcuts");
        println!("  random      Erdos-Renyi uniform random follows");
        println!("  communities Two dense communities joined by a thin chain");
        println!();
        println!("Default person_count: 100000");
        return;
    }

    println!("social-graph-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, fn(i64) -> GraphStore)> = match mode {
        "scalefree" => vec![("Scale-free", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "communities" => vec![("Two communities", gen_communities)],
        "all" => vec![
            ("Scale-free", gen_scale_free as fn(i64) -> GraphStore),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Two communities", gen_communities),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, person_count);
    }
}

fn run_benchmark(name: &str, generator: fn(i64) -> GraphStore, person_count: i64) {
    println!("--- {} ---", name);
    println!("Target: {} people", person_count);

    let t = Instant::now();
    let graph = generator(person_count);
    println!(
        "Generated in {:.2}s: {} people, {} connections, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.person_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    println!();
    println!("{:>8} {:>12} {:>12} {:>10}", "degree", "reached", "visited", "time");
    println!("{:->8} {:->12} {:->12} {:->10}", "", "", "", "");

    for degree in [1, 2, 3, 4, 6, 10] {
        let t = Instant::now();
        let Ok(result) = social_graph_core::bfs_reachable(&graph, 0, degree) else {
            continue;
        };
        println!(
            "{:>8} {:>12} {:>12} {:>8.1}ms",
            degree,
            result.reached.len(),
            result.nodes_visited,
            t.elapsed().as_secs_f64() * 1000.0
        );
        if result.nodes_visited >= graph.person_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    let last = graph.person_count() as PersonId - 1;
    println!();
    let t = Instant::now();
    let path = social_graph_core::shortest_path(&graph, 0, last);
    let elapsed = t.elapsed().as_secs_f64() * 1000.0;
    if path.is_empty() {
        println!("Introduce 0 → {}: no path ({:.1}ms)", last, elapsed);
    } else {
        println!("Introduce 0 → {}: {} hops in {:.1}ms", last, path.len() - 1, elapsed);
    }

    let t = Instant::now();
    if let Ok(common) = social_graph_core::common_connections(&graph, 0, last, 2) {
        println!(
            "Common 0 ∩ {} at degree 2: {} people in {:.1}ms",
            last,
            common.number_in_common,
            t.elapsed().as_secs_f64() * 1000.0
        );
    }

    // min/max touches every person; keep it to graphs where that stays quick.
    if graph.person_count() <= 200_000 {
        let t = Instant::now();
        if let Ok(mm) = social_graph_core::min_max_connections(&graph, 2) {
            let describe = |p: Option<social_graph_core::PersonConnections>| {
                p.map(|p| format!("{} ({})", p.id, p.connections))
                    .unwrap_or_else(|| "-".to_string())
            };
            println!(
                "Min/max at degree 2: min {}, max {} in {:.1}ms",
                describe(mm.min),
                describe(mm.max),
                t.elapsed().as_secs_f64() * 1000.0
            );
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, O(people + connections)
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn people(count: i64, connections_per_person: i64) -> GraphBuilder {
    let mut builder =
        GraphBuilder::with_capacity(count as usize, (count * connections_per_person) as usize);
    for id in 0..count {
        builder.add_person(id, format!("Person {}", id));
    }
    builder
}

fn finish(builder: GraphBuilder) -> GraphStore {
    // Generators only connect ids they created.
    builder.build().unwrap_or_else(|e| panic!("generator produced an invalid graph: {e}"))
}

/// Scale-free via edge-list sampling: popular people attract more followers.
fn gen_scale_free(count: i64) -> GraphStore {
    let per_person = 10i64;
    let mut builder = people(count, per_person);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<PersonId> = Vec::with_capacity((count * per_person * 2) as usize);

    let seed = 5.min(count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            builder.add_connection(i, j);
            builder.add_connection(j, i);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for person in seed..count {
        for _ in 0..per_person.min(person) {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != person {
                builder.add_connection(person, target);
                endpoints.push(person);
                endpoints.push(target);
            }
        }
    }

    finish(builder)
}

/// Small-world: each person knows the next K on a ring, with a small chance
/// of knowing someone random instead.
fn gen_small_world(count: i64) -> GraphStore {
    let k = 10i64;
    let p = 0.05f64;
    let mut builder = people(count, k);
    let mut rng = FastRng::new(67890);

    for i in 0..count {
        for j in 1..=k {
            let neighbor = (i + j) % count;
            if rng.next_f64() < p {
                let rewired = rng.next(count as u64) as PersonId;
                builder.add_connection(i, if rewired != i { rewired } else { neighbor });
            } else {
                builder.add_connection(i, neighbor);
            }
        }
    }

    finish(builder)
}

/// Erdos-Renyi: ~10 uniformly random follows per person.
fn gen_random(count: i64) -> GraphStore {
    let target = count * 10;
    let mut builder = people(count, 10);
    let mut rng = FastRng::new(54321);

    for _ in 0..target {
        let from = rng.next(count as u64) as PersonId;
        let to = rng.next(count as u64) as PersonId;
        if from != to {
            builder.add_connection(from, to);
        }
    }

    finish(builder)
}

/// Two dense communities joined by a short chain of go-betweens. Worst case
/// for "introduce" across the bottleneck.
fn gen_communities(count: i64) -> GraphStore {
    let bridge_len = 10i64.min(count);
    let size = (count - bridge_len) / 2;
    let mut builder = people(count, 20);
    let mut rng = FastRng::new(99999);

    let mut connect_community = |builder: &mut GraphBuilder, offset: i64| {
        for i in 0..size {
            for _ in 0..20i64.min(size - 1) {
                let target = rng.next(size as u64) as PersonId;
                if target != i {
                    builder.add_connection(offset + i, offset + target);
                }
            }
        }
    };

    connect_community(&mut builder, 0);

    let bridge_start = size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let prev = if i == 0 { size - 1 } else { id - 1 };
        if prev >= 0 {
            builder.add_connection(prev, id);
        }
    }

    let b_start = bridge_start + bridge_len;
    if size > 0 {
        builder.add_connection(b_start - 1, b_start);
    }
    connect_community(&mut builder, b_start);

    finish(builder)
}

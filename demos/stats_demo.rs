use clap::Parser;
use probe_set::IntHashSet;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.55)]
    load_factor: f32,

    /// Distance between consecutive inserted values. Multiples of the table
    /// capacity all land in the same home slot.
    #[arg(short = 's', long = "stride", default_value_t = 1)]
    stride: u64,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating IntHashSet with target capacity {} and load factor {}",
        args.target_capacity, args.load_factor
    );

    let mut set: IntHashSet<u64> =
        match IntHashSet::with_capacity_and_load_factor(args.target_capacity, args.load_factor) {
            Ok(set) => set,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        };

    let capacity = set.capacity();
    println!("Actual capacity: {}", capacity);

    let num_values = (capacity as f64 * args.load_factor as f64) as u64;
    println!(
        "Filling set with {} u64 values (stride {})...",
        num_values, args.stride
    );
    for i in 1..=num_values {
        set.add(i.wrapping_mul(args.stride));
    }

    println!("Inserted {} values into set", set.len());
    if set.capacity() != capacity {
        println!("Set grew to capacity {}", set.capacity());
    }
    println!(
        "Final load factor: {:.2}%",
        (set.len() as f64 / set.capacity() as f64) * 100.0
    );

    set.probe_histogram().print();
    set.debug_stats().print();

    set.compact();
    println!("After compact: capacity {}", set.capacity());
    set.debug_stats().print();
}

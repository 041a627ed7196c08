use fibbench::{fib_iterative, fib_iterative_checked, fib_recursive};

fn main() {
    divan::main();
}

#[divan::bench(args = [10, 20, 25, 30])]
fn recursive(n: i32) -> i64 {
    fib_recursive(divan::black_box(n))
}

#[divan::bench(args = [10, 92, 1000, 100_000])]
fn iterative(n: i32) -> i64 {
    fib_iterative(divan::black_box(n))
}

#[divan::bench(args = [10, 92, 1000])]
fn iterative_checked(n: i32) -> Option<i64> {
    fib_iterative_checked(divan::black_box(n))
}

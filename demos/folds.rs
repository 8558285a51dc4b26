use lazy_streams::{list, stream, List, Stream, Tree};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let fib: List<i64> = vec![1, 1, 2, 3, 5, 8, 13, 21].into_iter().collect();
    println!("{} sums to {}", fib, list::sum(&fib));
    println!("doubled: {}", list::double_all(&fib));

    let z1: List<i64> = vec![1, 2].into_iter().collect();
    let z2: List<i64> = vec![3, 4].into_iter().collect();
    println!("appended: {}", z1.append(&z2));
    let matrix: List<List<i64>> = vec![z1, z2, fib].into_iter().collect();
    println!("matrix sum: {}", list::sum_matrix(&matrix));

    let tree = Tree::new(1, vec![Tree::leaf(2), Tree::new(3, vec![Tree::leaf(4)])]);
    println!("{}", tree);
    println!("sumtree: {}", list::sumtree(&tree));
    println!("labels: {}", list::labels(&tree));
    println!("doubled: {}", list::double_tree(&tree));

    let naturals = Stream::unfold(1_u64, |n| n + 1);
    let odd_squares = naturals.map(|n| n * n).filter(|n| n % 2 == 1);
    println!("odd squares: {}", odd_squares.take(5));
    println!("forced so far: {:?}", naturals);
    println!("product of 1..=10: {}", stream::product(&naturals.take(10)));
    println!("all positive: {}", stream::all_true(&naturals.take(100).map(|n| n > 0)));
}

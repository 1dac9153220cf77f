use spotting::trie::Trie;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=spotting=trace shows node creation and pruning
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A tiny vocabulary of terms we want to spot in free text
    let mut trie = Trie::new();
    for (term, id) in [("rust", 1), ("rustacean", 2), ("trie", 3), ("tries", 4)] {
        trie.add(term.chars(), id).unwrap();
    }

    for text in [
        "every rustacean loves a good trie",
        "tries are fun",
        "nothing to see here",
    ] {
        match trie.search(text.chars()).unwrap() {
            Some((start, node)) => println!(
                "{text:?}: longest term {:?} (id {:?}) at {start}",
                node.key().into_iter().collect::<String>(),
                node.value()
            ),
            None => println!("{text:?}: no known term"),
        }
    }

    // Longest registered prefix of an input
    if let Some(node) = trie.find("rusty".chars(), true).unwrap() {
        println!(
            "\"rusty\" starts with {:?}",
            node.key().into_iter().collect::<String>()
        );
    }

    // Removing a key prunes what it alone needed
    trie.remove("rustacean".chars()).unwrap();
    assert!(trie.find_prefix("rustacean".chars()).unwrap().is_terminal());
    println!("remaining keys:");
    for pair in trie.iter_sorted() {
        println!(
            "  key: {}, value: {}",
            pair.key.iter().collect::<String>(),
            pair.value
        );
    }
}

use spotting::trie::Trie;
use unicode_segmentation::UnicodeSegmentation;

fn main() {
    // Create our trie
    let mut trie = Trie::new();

    // Insert some graphemes
    let s = "a̐éö̲\r\n";
    let input = s.graphemes(true);
    let count = input.clone().count();
    trie.add(input.clone(), count).unwrap();
    assert!(trie.contains_key(input.clone()).unwrap());
    assert_eq!(trie.get(input.clone()).unwrap(), Some(&count));

    // Spot the stored cluster sequence inside a longer text
    let text = format!("xyz{s}xyz");
    let (start, node) = trie.search(text.graphemes(true)).unwrap().unwrap();
    assert_eq!(start, 3);
    assert_eq!(node.depth(), count);
    println!("found {:?} at grapheme {start}", node.key().concat());
}

/// Whether every `{`, `[` and `(` in `line` is closed by its matching bracket, in order
///
/// Characters other than brackets are ignored.
pub fn is_balanced(line: &str) -> bool {
    let mut expected: Vec<char> = Vec::new();
    for c in line.chars() {
        match c {
            '{' => expected.push('}'),
            '[' => expected.push(']'),
            '(' => expected.push(')'),
            '}' | ']' | ')' => {
                if expected.pop() != Some(c) {
                    return false;
                }
            }
            _ => {}
        }
    }
    expected.is_empty()
}

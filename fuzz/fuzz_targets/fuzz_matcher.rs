#![no_main]

use arbitrary::Arbitrary;
use cursorkit::{CharSets, CountResult, RunMatcher, RunResult, UnitCursor, Utf8Cursor};
use libfuzzer_sys::fuzz_target;

fn run_len(result: RunResult<char>) -> CountResult {
    result
        .map(|run| run.len())
        .map_err(|partial| partial.map(|run| run.len()))
}

#[derive(Debug, Arbitrary)]
enum Step {
    Whitespace,
    Word,
    DiscardWhitespace,
    DiscardWord,
    WordInto(u8),
    InSet,
    NotInSet,
    Peek,
    Unread,
}

#[derive(Debug, Arbitrary)]
struct MatcherInput<'a> {
    text: &'a str,
    set: &'a str,
    steps: Vec<Step>,
}

fuzz_target!(|input: MatcherInput<'_>| {
    let mut sets = CharSets::new();
    sets.add_from_text("set", input.set);
    let mut cursor = Utf8Cursor::new(input.text);
    cursor.attach_sets(sets);
    let mut matcher = RunMatcher::new(cursor);

    for step in input.steps {
        let before = matcher.get_ref().position();
        let consumed = match step {
            Step::Whitespace => run_len(matcher.read_whitespace()),
            Step::Word => run_len(matcher.read_word()),
            Step::DiscardWhitespace => matcher.discard_whitespace(),
            Step::DiscardWord => matcher.discard_word(),
            Step::WordInto(len) => {
                let mut receiver = vec!['\0'; usize::from(len)];
                matcher.read_word_into(&mut receiver)
            }
            Step::InSet => matcher.get_mut().discard_matching_set("set"),
            Step::NotInSet => matcher.get_mut().discard_not_matching_set("set"),
            Step::Peek => {
                let _ = matcher.get_mut().peek();
                assert_eq!(matcher.get_ref().position(), before);
                continue;
            }
            Step::Unread => {
                let _ = matcher.get_mut().unread();
                continue;
            }
        };
        match consumed {
            Ok(0) => assert_eq!(matcher.get_ref().position(), before),
            Ok(_) => assert!(matcher.get_ref().position() > before),
            Err(partial) => {
                assert!(partial.is_end_of_stream());
                assert_eq!(partial.value, 0);
                assert_eq!(input.text.len(), before);
            }
        }
    }
});

// A producer, a filter and a consumer chained with coroutines.
//
// The producer yields lines of text, the filter resumes the producer and
// yields each line prefixed with its line number, and the consumer drives
// the filter until it returns. Each stage is written as a plain loop; none
// of them knows that the others are suspended in the middle of theirs.

use threadcoro::Caller;
use threadcoro::CoroError;
use threadcoro::Coroutine;
use threadcoro::Return;
use threadcoro::Yield;
use threadcoro::Yielder;

type Stage = Coroutine<(), String, usize>;

fn producer(text: &'static str) -> Stage {
    Coroutine::new(move |y: &Yielder<(), String, usize>, ()| {
        let mut count = 0;
        for line in text.lines() {
            y.suspend(line.to_owned());
            count += 1;
        }
        count
    })
}

fn filter(source: Stage) -> Stage {
    Coroutine::new(move |y: &Yielder<(), String, usize>, ()| {
        let mut number = 0;
        loop {
            match source.resume(()) {
                Ok(Yield(line)) => {
                    number += 1;
                    y.suspend(format!("{number:5} {line}"));
                }
                Ok(Return(count)) => return count,
                Err(err) => panic!("producer failed: {err}"),
            }
        }
    })
}

fn consume(stage: &Stage) -> Result<Vec<String>, CoroError> {
    let mut lines = Vec::new();
    let count = stage.for_each(|line| lines.push(line))?;
    assert_eq!(count, lines.len());
    Ok(lines)
}

const POEM: &str = "\
Shall I compare thee to a summer's day?
Thou art more lovely and more temperate:
Rough winds do shake the darling buds of May,
And summer's lease hath all too short a date";

fn main() {
    match consume(&filter(producer(POEM))) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_every_line() {
        let lines = consume(&filter(producer("a\nb\nc"))).unwrap();
        assert_eq!(lines, ["    1 a", "    2 b", "    3 c"]);
    }

    #[test]
    fn empty_text() {
        let lines = consume(&filter(producer(""))).unwrap();
        assert!(lines.is_empty());
    }
}

#![deny(warnings)]

/// A cursor over any iterator that keeps what it reads in a buffer so
/// callers can look ahead and backtrack. Everything between the last
/// `extract`/`ignore` and the cursor is the current lexeme.
pub struct Scanner<I: Iterator>
where
    I::Item: Clone,
{
    src: I,
    buf: Vec<I::Item>,
    // index of the last consumed item, -1 before the first one
    pos: isize,
}

impl<I> Iterator for Scanner<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;
    fn next(&mut self) -> Option<Self::Item> {
        self.pos += 1;
        self.fill();
        let blen = self.buf.len() as isize;
        if self.pos >= blen {
            self.pos = blen;
        }
        self.curr()
    }
}

impl<I> Scanner<I>
where
    I: Iterator,
    I::Item: Clone,
{
    pub fn new(source: I) -> Scanner<I> {
        Scanner {
            src: source,
            buf: Vec::new(),
            pos: -1,
        }
    }

    pub fn pos(&self) -> isize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: isize) -> bool {
        if pos < -1 || pos > (self.buf.len() as isize) {
            return false;
        }
        self.pos = pos;
        true
    }

    pub fn curr(&self) -> Option<I::Item> {
        usize::try_from(self.pos)
            .ok()
            .and_then(|pos| self.buf.get(pos))
            .cloned()
    }

    // pull from the source until the buffer covers self.pos
    fn fill(&mut self) {
        while self.pos >= (self.buf.len() as isize) {
            match self.src.next() {
                Some(item) => self.buf.push(item),
                None => break,
            }
        }
    }

    pub fn peek(&mut self) -> Option<I::Item> {
        let backtrack = self.pos;
        let peeked = self.next();
        self.pos = backtrack;
        peeked
    }

    /// Items consumed since the last extract/ignore.
    pub fn view(&self) -> &[I::Item] {
        let n = ((self.pos + 1).max(0) as usize).min(self.buf.len());
        &self.buf[..n]
    }

    /// Drop the current lexeme, the next item read starts a fresh one.
    pub fn ignore(&mut self) {
        let n = ((self.pos + 1).max(0) as usize).min(self.buf.len());
        self.buf.drain(..n);
        self.pos = -1;
    }

    pub fn extract(&mut self) -> Vec<I::Item> {
        let lexeme = self.view().to_vec();
        self.ignore();
        lexeme
    }

    /// Advance only if the next item satisfies `pred`.
    pub fn accept_if(&mut self, pred: impl Fn(&I::Item) -> bool) -> Option<I::Item> {
        let backtrack = self.pos;
        match self.next() {
            Some(next) if pred(&next) => Some(next),
            _ => {
                self.set_pos(backtrack);
                None
            }
        }
    }

    /// Advance over every leading item satisfying `pred`, returns whether
    /// the scanner moved. `curr()` is then the last matching item.
    pub fn skip_matching(&mut self, pred: impl Fn(&I::Item) -> bool) -> bool {
        let mut advanced = false;
        while self.accept_if(&pred).is_some() {
            advanced = true;
        }
        advanced
    }
}

impl<I> Scanner<I>
where
    I: Iterator,
    I::Item: Clone + PartialEq,
{
    pub fn accept(&mut self, what: &I::Item) -> Option<I::Item> {
        self.accept_if(|next| next == what)
    }

    // Advance the scanner only if the next item is in the 'any' set
    pub fn accept_any(&mut self, any: &[I::Item]) -> Option<I::Item> {
        self.accept_if(|next| any.contains(next))
    }

    pub fn skip_all(&mut self, over: &[I::Item]) -> bool {
        self.skip_matching(|next| over.contains(next))
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    /// Skip whitespace and drop it from the current lexeme.
    pub fn ignore_ws(&mut self) {
        self.skip_matching(|c| c.is_whitespace());
        self.ignore();
    }

    /// Consume `word` as a whole or nothing at all.
    pub fn accept_str(&mut self, word: &str) -> bool {
        let backtrack = self.pos;
        for expected in word.chars() {
            if self.accept(&expected).is_none() {
                self.set_pos(backtrack);
                return false;
            }
        }
        true
    }
}

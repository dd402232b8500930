use rand::Rng;

const PICKS_PER_POOL: usize = 2;

pub const EU_CROWDFUNDING_STARTERS: [&str; 10] = [
    "What are the key requirements for crowdfunding platforms under EU Regulation 2020/1503?",
    "How do investor protection measures work in crowdfunding?",
    "What are the disclosure requirements for crowdfunding project owners?",
    "What are the investment limits for different types of investors?",
    "How does the cross-border passport system work for crowdfunding platforms?",
    "What are the authorization requirements for crowdfunding service providers?",
    "How are retail and sophisticated investors defined in the regulation?",
    "What are the key differences between loan-based and investment-based crowdfunding?",
    "What complaints handling procedures must platforms implement?",
    "How does the regulation address conflicts of interest in crowdfunding?",
];

pub const GENERAL_STARTERS: [&str; 10] = [
    "I need help understanding crowdfunding regulations for my platform",
    "What compliance requirements should I be aware of when starting a crowdfunding business?",
    "Help me understand the regulatory framework for cross-border crowdfunding",
    "I'm confused about investor protection requirements - can you clarify?",
    "What are the main regulatory risks in crowdfunding operations?",
    "I need guidance on disclosure requirements for crowdfunding projects",
    "How do I ensure my crowdfunding platform complies with EU regulations?",
    "What are the authorization procedures for crowdfunding service providers?",
    "Help me understand the differences between retail and sophisticated investor rules",
    "I need clarity on the regulatory requirements for loan-based crowdfunding",
];

/// Fisher-Yates shuffle into a new vector; `pool` is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(pool: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = pool.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Four starters: two regulatory questions followed by two general ones.
pub fn conversation_suggestions() -> Vec<String> {
    conversation_suggestions_with(&mut rand::thread_rng())
}

pub fn conversation_suggestions_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    shuffle(&EU_CROWDFUNDING_STARTERS, rng)
        .into_iter()
        .take(PICKS_PER_POOL)
        .chain(
            shuffle(&GENERAL_STARTERS, rng)
                .into_iter()
                .take(PICKS_PER_POOL),
        )
        .map(str::to_string)
        .collect()
}

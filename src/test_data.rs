#[cfg(test)]
pub const POST_DATA: &str = "# What I learned after 20+ years of software development
How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

## Non technical

### Have a honest image of yourself

You finished university and learned a lot. You solved many hard problems.
";

#[cfg(test)]
pub const NO_TITLE_DATA: &str = "[ID]: # (a63bd715-a3fe-4788-b0e1-2a3153778544)

# What I learned after 20+ years of software development
How to be a great software engineer?
";

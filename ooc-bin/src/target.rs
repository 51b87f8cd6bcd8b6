#[derive(Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "lower")]
pub enum Target {
    #[value(alias = "js")]
    JavaScript,
}

impl From<Target> for ooc::Target {
    fn from(value: Target) -> Self {
        match value {
            Target::JavaScript => ooc::Target::JavaScript,
        }
    }
}

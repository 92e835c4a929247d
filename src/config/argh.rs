use argh::FromArgs;

#[derive(FromArgs, Eq, PartialEq, Debug)]
#[argh(description = "run build configurations as parallel external processes")]
pub struct Args {
    #[argh(switch, description = "show the executable version")]
    pub version: bool,

    #[argh(subcommand)]
    pub nested: Option<Subcommands>,

    #[argh(
        option,
        short = 'f',
        description = "specify an alternate parbuild config file"
    )]
    pub file: Option<String>,
}

#[derive(FromArgs, Eq, PartialEq, Debug)]
#[argh(subcommand)]
pub enum Subcommands {
    Run(RunArgs),
    List(ListArgs),
}

#[derive(FromArgs, Eq, PartialEq, Debug)]
#[argh(subcommand, name = "run", description = "run every configured build")]
pub struct RunArgs {
    #[argh(
        option,
        short = 'j',
        description = "cap on concurrent builds (default: available CPUs)"
    )]
    pub workers: Option<usize>,
}

#[derive(FromArgs, Eq, PartialEq, Debug)]
#[argh(subcommand, name = "list", description = "list configured builds")]
pub struct ListArgs {}

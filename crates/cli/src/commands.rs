use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a serialized filter into the connector's native predicate
    Compile {
        #[arg(long, help = "Push-down settings file path")]
        config: String,

        #[arg(long, help = "Serialized filter string, e.g. a0c23s1d5o2")]
        filter: String,

        #[arg(
            long = "where",
            help = "Print the filter as a SQL WHERE clause (jdbc connector only)"
        )]
        where_clause: bool,

        #[arg(long, help = "If set, prints the result as JSON")]
        json: bool,
    },
    /// Show the filter after each compilation stage
    Explain {
        #[arg(long, help = "Push-down settings file path")]
        config: String,

        #[arg(long, help = "Serialized filter string, e.g. a0c23s1d5o2")]
        filter: String,

        #[arg(long, help = "If set, prints the stages as JSON")]
        json: bool,
    },
}

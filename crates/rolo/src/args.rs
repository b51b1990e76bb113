use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rolo")]
#[command(about = "Manage a personal address book from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Address book to operate on (URI like csv://path, or a bare path)
    #[arg(short, long, global = true)]
    pub book: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List entries
    #[command(alias = "ls")]
    List {
        /// Sort by this field
        #[arg(long)]
        sort: Option<String>,

        /// Sort in descending order
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Ignore case when sorting
        #[arg(long, requires = "sort")]
        ignore_case: bool,
    },

    /// Show one entry in full
    Show {
        /// Position of the entry, as printed by list
        index: usize,
    },

    /// Add an entry from field=value pairs
    Add {
        /// Field assignments, e.g. firstname=Ada email=ada@example.com
        #[arg(required = true, num_args = 1..)]
        fields: Vec<String>,
    },

    /// Remove entries by position
    #[command(alias = "rm")]
    Remove {
        /// Positions of the entries, as printed by list
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<usize>,
    },

    /// Search entries
    Search {
        /// Substring to look for, or a regular expression with --regex
        pattern: String,

        /// Fields to search (default: all)
        #[arg(short, long, num_args = 1..)]
        fields: Vec<String>,

        /// Treat the pattern as a regular expression
        #[arg(short, long)]
        regex: bool,

        /// Ignore case (substring search only)
        #[arg(short, long)]
        ignore_case: bool,
    },

    /// List the available storage backends
    Backends,

    /// Copy all entries from one address book to another
    Convert {
        /// Source address book (URI or path)
        source: String,

        /// Destination address book (URI or path)
        dest: String,
    },
}

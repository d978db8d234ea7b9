use std::io::{self, Read};
use std::path::PathBuf;

use log::{debug, info};
use prose_site::site::{self, SiteConfig};
use prose_site::translator;
use structopt::StructOpt;

fn read() -> io::Result<String> {
    let mut content = String::new();
    io::stdin().lock().read_to_string(&mut content)?;
    Ok(content)
}

#[derive(Debug, StructOpt)]
#[structopt(name = "prose-site", about = "Markdown to HTML page generator")]
struct Opt {
    #[structopt(long = "debug")]
    pub debug: bool,

    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Read markdown from stdin and print the HTML fragment
    Convert,
    /// Render a content directory into a public directory
    Build {
        #[structopt(long, parse(from_os_str), default_value = "content")]
        content: PathBuf,
        #[structopt(long = "static", parse(from_os_str), default_value = "static")]
        static_dir: PathBuf,
        #[structopt(long, parse(from_os_str), default_value = "public")]
        public: PathBuf,
        #[structopt(long, parse(from_os_str), default_value = "template.html")]
        template: PathBuf,
    },
}

fn run(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    match opt.cmd {
        Command::Convert => {
            let content = read()?;
            println!("{}", translator::translate(&content)?);
        }
        Command::Build {
            content,
            static_dir,
            public,
            template,
        } => {
            let config = SiteConfig {
                content,
                static_dir,
                public,
                template,
            };
            for page in site::build(&config)? {
                for link in &page.links {
                    info!("{}: {}", page.dest.display(), link);
                }
            }
            info!("static site generation complete");
        }
    }
    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    let level = if opt.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("opt = {:?}", &opt);

    if let Err(e) = run(opt) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

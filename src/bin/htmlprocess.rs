use std::{path::PathBuf, sync::Arc};

use anyhtml::{
    sax::{
        handler::DebugHandler,
        parser::{HTMLReaderBuilder, ParserOption},
    },
    save::XmlWriter,
};
use clap::Parser;

#[derive(clap::Parser)]
struct CmdArgs {
    #[clap(long, help = "dump the SAX event stream instead of XML")]
    sax: bool,
    #[clap(long, help = "disable namespace reporting")]
    no_namespaces: bool,
    #[clap(long, help = "drop unknown elements instead of adopting them")]
    ignore_bogons: bool,
    #[clap(long, help = "do not fill in default attribute values")]
    no_default_attributes: bool,
    #[clap(help = "path to the target HTML document")]
    file: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .init()?;
    let args = CmdArgs::parse();

    let mut builder = HTMLReaderBuilder::new();
    if args.no_namespaces {
        builder = builder.disable_option(ParserOption::Namespaces);
    }
    if args.ignore_bogons {
        builder = builder.enable_option(ParserOption::IgnoreBogons);
    }
    if args.no_default_attributes {
        builder = builder.disable_option(ParserOption::DefaultAttributes);
    }

    if args.sax {
        let handler = Arc::new(DebugHandler::default());
        let mut reader = builder.set_handler(handler.clone()).build();
        for file in args.file {
            reader.parse_file(file)?;
            print!("{}", handler.take_buffer());
        }
    } else {
        let writer = Arc::new(XmlWriter::default());
        let mut reader = builder
            .set_content_handler(writer.clone())
            .set_lexical_handler(writer.clone())
            .build();
        for file in args.file {
            reader.parse_file(file)?;
            println!("{}", writer.take_result());
        }
    }

    Ok(())
}

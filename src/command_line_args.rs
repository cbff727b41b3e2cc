// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env;
use std::io;
use std::process;

use crate::config::MiningConfig;
use argparse::{ArgumentParser, Store, StoreOption};

pub struct Arguments {
    pub input_file_path: String,
    pub output_rules_path: String,
    pub config: MiningConfig,
    pub recommend_for: Option<String>,
}

pub fn parse_args_or_exit() -> Arguments {
    let mut input_file_path = String::new();
    let mut output_rules_path = String::new();
    let mut min_support: u32 = 0;
    let mut min_confidence: f64 = 0.0;
    let mut recommend_for: Option<String> = None;

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Parallel FPGrowth association rule mining over reading histories.");

        parser
            .refer(&mut input_file_path)
            .add_option(
                &["--input"],
                Store,
                "Input CSV of entity,item pairs, one pair per line.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut output_rules_path)
            .add_option(
                &["--output"],
                Store,
                "File path in which to store output rules as JSON. \
                 Record fields: antecedent, consequent, support, confidence.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support, as an absolute transaction count.",
            )
            .metavar("count")
            .required();

        parser
            .refer(&mut min_confidence)
            .add_option(
                &["--min-confidence"],
                Store,
                "Minimum rule confidence threshold, as a percentage in [0,100].",
            )
            .metavar("threshold")
            .required();

        parser
            .refer(&mut recommend_for)
            .add_option(
                &["--recommend-for"],
                StoreOption,
                "Comma separated list of known items; prints the items \
                 the mined rules recommend for them.",
            )
            .metavar("items");

        if env::args().count() == 1 {
            parser.print_help("Usage:", &mut io::stderr()).unwrap();
            process::exit(1);
        }

        match parser.parse_args() {
            Ok(()) => {}
            Err(err) => {
                process::exit(err);
            }
        }
    }

    let config = match MiningConfig::new(min_support, min_confidence) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    Arguments {
        input_file_path,
        output_rules_path,
        config,
        recommend_for,
    }
}

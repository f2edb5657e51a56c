use anyhow::Context;
use clap::Parser;
use lbasi::utils::error::ErrorSeverity;
use lbasi::utils::{logger, validation::Validate};
use lbasi::{
    render, CliConfig, CommandTextExtractor, Diagnoser, LbasiError, ProductList, RulesConfig,
    TextExtractor,
};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting lbasi");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        std::process::exit(report_failure(&e));
    }
}

/// Prints the error for the user and returns the process exit code.
fn report_failure(error: &anyhow::Error) -> i32 {
    let Some(e) = error.downcast_ref::<LbasiError>() else {
        tracing::error!("❌ {:#}", error);
        eprintln!("❌ {:#}", error);
        return 1;
    };

    tracing::error!(
        "❌ {:#} (Category: {:?}, Severity: {:?})",
        error,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn load_rules(config: &CliConfig) -> anyhow::Result<RulesConfig> {
    let rules = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading rules from: {}", path);
            RulesConfig::from_file(path).with_context(|| format!("reading rules file '{}'", path))?
        }
        None => RulesConfig::default(),
    };
    rules.validate()?;
    Ok(rules)
}

fn collect_products(config: &CliConfig, diagnoser: &Diagnoser) -> anyhow::Result<(ProductList, Vec<String>)> {
    let mut products = ProductList::new();
    let mut notices = Vec::new();

    if let Some(path) = &config.products_file {
        let text = std::fs::read_to_string(path)
            .map_err(LbasiError::from)
            .with_context(|| format!("reading products file '{}'", path))?;
        let added = products.append_text(diagnoser.classifier(), &text);
        tracing::info!("Read {} product(s) from {}", added, path);
    }

    for product in &config.products {
        products.append_text(diagnoser.classifier(), product);
    }

    if let (Some(image), Some(command)) = (&config.image, &config.ocr_command) {
        let extractor = CommandTextExtractor::from_command_line(command)?;
        let extracted = std::fs::read(image)
            .map_err(LbasiError::from)
            .and_then(|payload| extractor.extract_text(&payload));
        if let Some(notice) = diagnoser.absorb_extracted_text(&mut products, extracted) {
            notices.push(notice);
        }
    }

    Ok((products, notices))
}

fn print_questionnaire(diagnoser: &Diagnoser) {
    let strategy = diagnoser.strategy();
    println!("Rules: {}", strategy.name());
    for (i, question) in strategy.questionnaire().questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.prompt);
        for (j, option) in question.options.iter().enumerate() {
            println!("   [{}] {}", j, option.label);
        }
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    config.validate()?;

    let mut rules = load_rules(config)?;
    if config.split_commas {
        rules.rules.split_on_commas = Some(true);
        tracing::debug!("🔧 Comma splitting enabled from command line");
    }
    let diagnoser = rules.build_diagnoser(config.rule_override())?;

    if config.list_questions {
        print_questionnaire(&diagnoser);
        return Ok(());
    }

    let (products, notices) = collect_products(config, &diagnoser)?;
    let answers = config.resolve_answers(diagnoser.strategy().questionnaire());

    let mut diagnosis = match diagnoser.diagnose(&products, &answers, config.recent_procedure) {
        Ok(diagnosis) => diagnosis,
        Err(LbasiError::EmptyInput) => {
            // The severity check still stands on its own without products.
            let (score, guidance) = diagnoser.evaluate(&answers, config.recent_procedure);
            println!("{} (score {})", guidance.status, score);
            println!("{}", guidance.advice);
            return Err(LbasiError::EmptyInput.into());
        }
        Err(e) => return Err(e.into()),
    };
    diagnosis.notices.extend(notices);

    let output = render(&diagnosis, config.format)?;
    print!("{}", output);

    tracing::info!("✅ Diagnosis complete: {}", diagnosis.guidance.status);
    Ok(())
}

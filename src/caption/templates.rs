//! One caption builder per image type.
//!
//! Each builder derives the file name from the same [`ImageSubject`] the
//! planner uses, so a caption always describes a planned file.

use serde_json::{json, Map, Value};

use super::nouns::{count_noun, noun};
use super::text::{Punct, TextBuilder};
use super::CaptionRecord;
use crate::colors::Color;
use crate::domains::DomainCounts;
use crate::error::Error;
use crate::model::{Assembly, DomainSource, View};
use crate::naming::{Coloring, ImageSubject};

/// Facts shared by every caption of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionContext<'a> {
    /// Entry id as used in file names.
    pub entry_id: &'a str,
    /// Camera view, for multi-view images.
    pub view: Option<View>,
}

/// One molecule listed in a whole-structure caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeSummary {
    /// Entity name.
    pub name: String,
    /// Number of chain instances.
    pub copies: usize,
    /// Color of the entity when the image is colored by entity.
    pub color: Option<Color>,
}

/// What a domain caption needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainFacts<'a> {
    /// Classification source.
    pub source: DomainSource,
    /// Family id.
    pub family: &'a str,
    /// Family name.
    pub family_name: &'a str,
    /// Entity carrying the domain.
    pub entity_id: &'a str,
    /// Entity name.
    pub entity_name: &'a str,
    /// Representative label chain.
    pub chain_id: &'a str,
    /// Representative author chain.
    pub auth_chain_id: &'a str,
    /// Copy numbers.
    pub counts: DomainCounts,
}

fn push_view(text: &mut TextBuilder, view: Option<View>) {
    if let Some(view) = view {
        text.words("viewed from the");
        text.word(view.as_str());
    }
}

/// `and viewed from the <view>` when the image has a view.
fn and_view(text: &mut TextBuilder, view: Option<View>) {
    if view.is_some() {
        text.word("and");
        push_view(text, view);
    }
}

fn push_entry(text: &mut TextBuilder, entry_id: &str) {
    text.words("PDB entry");
    text.bold(entry_id);
}

/// `a`, `a and b`, `a, b and c`.
fn push_molecule_list(
    text: &mut TextBuilder,
    molecules: &[MoleculeSummary],
) -> Result<(), Error> {
    for (i, molecule) in molecules.iter().enumerate() {
        if i > 0 {
            if i + 1 == molecules.len() {
                text.word("and");
            } else {
                text.punct(Punct::Comma);
            }
        }
        text.words(&count_noun(molecule.copies, "cop|y|ies")?);
        text.word("of");
        match molecule.color {
            Some(color) => text.colored(&molecule.name, color),
            None => text.words(&molecule.name),
        }
    }
    Ok(())
}

fn section(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| (*p).to_owned()).collect()
}

fn finish(
    ctx: &CaptionContext<'_>,
    subject: &ImageSubject,
    alt: &TextBuilder,
    description: &TextBuilder,
    section: Vec<String>,
    extras: Option<Map<String, Value>>,
) -> CaptionRecord {
    CaptionRecord {
        filename: subject.stem(ctx.entry_id, ctx.view),
        alt: alt.render_plain(),
        description: description.render(),
        clean_description: description.render_plain(),
        entry_id: ctx.entry_id.to_owned(),
        view: ctx.view,
        section,
        extras,
    }
}

fn simple_alt(
    ctx: &CaptionContext<'_>,
    what: &str,
    preposition: &str,
) -> TextBuilder {
    let mut alt = TextBuilder::new();
    alt.words(what);
    alt.word(preposition);
    push_entry(&mut alt, ctx.entry_id);
    if ctx.view.is_some() {
        alt.punct(Punct::Comma);
        push_view(&mut alt, ctx.view);
    }
    alt
}

/// Deposited structure colored by chain or by entity.
///
/// `molecules` should already exclude solvent.
pub fn entry_caption(
    ctx: &CaptionContext<'_>,
    coloring: Coloring,
    oligomer: &str,
    molecules: &[MoleculeSummary],
) -> Result<CaptionRecord, Error> {
    let subject = ImageSubject::Entry { coloring };

    let mut text = TextBuilder::new();
    text.words("The deposited structure of");
    push_entry(&mut text, ctx.entry_id);
    text.punct(Punct::Comma);
    text.word("a");
    text.word(oligomer);
    text.punct(Punct::Comma);
    text.words("coloured by");
    text.words(coloring.phrase());
    and_view(&mut text, ctx.view);
    text.punct(Punct::Period);
    if !molecules.is_empty() {
        text.words("The entry contains");
        push_molecule_list(&mut text, molecules)?;
        text.punct(Punct::Period);
    }

    let mut alt = simple_alt(ctx, "Deposited structure", "of");
    alt.punct(Punct::Comma);
    alt.words("coloured by");
    alt.words(coloring.phrase());

    Ok(finish(
        ctx,
        &subject,
        &alt,
        &text,
        section(&["entry", coloring.segment()]),
        None,
    ))
}

/// One assembly colored by chain or by entity.
pub fn assembly_caption(
    ctx: &CaptionContext<'_>,
    assembly: &Assembly,
    is_preferred: bool,
    coloring: Coloring,
) -> Result<CaptionRecord, Error> {
    let subject = ImageSubject::Assembly {
        assembly_id: assembly.assembly_id.clone(),
        coloring,
    };

    let mut text = TextBuilder::new();
    text.word("Assembly");
    text.word(&assembly.assembly_id);
    text.word("of");
    push_entry(&mut text, ctx.entry_id);
    if let Some(state) = assembly.oligomer_name() {
        text.punct(Punct::Comma);
        text.word("a");
        text.word(state);
        text.punct(Punct::Comma);
    }
    text.words("coloured by");
    text.words(coloring.phrase());
    and_view(&mut text, ctx.view);
    text.punct(Punct::Period);
    if is_preferred {
        text.words("This is the preferred assembly of the entry.");
    }

    let mut alt = simple_alt(
        ctx,
        &format!("Assembly {}", assembly.assembly_id),
        "of",
    );
    alt.punct(Punct::Comma);
    alt.words("coloured by");
    alt.words(coloring.phrase());

    Ok(finish(
        ctx,
        &subject,
        &alt,
        &text,
        section(&["assembly", &assembly.assembly_id, coloring.segment()]),
        None,
    ))
}

/// Deposited structure with one entity highlighted.
pub fn entity_caption(
    ctx: &CaptionContext<'_>,
    entity_id: &str,
    entity_name: &str,
    copies: usize,
    color: Color,
) -> Result<CaptionRecord, Error> {
    let subject = ImageSubject::Entity {
        entity_id: entity_id.to_owned(),
    };

    let mut text = TextBuilder::new();
    text.words("The deposited structure of");
    push_entry(&mut text, ctx.entry_id);
    text.word("with");
    text.words(&count_noun(copies, "cop|y|ies")?);
    text.word("of");
    text.colored(entity_name, color);
    text.punct(Punct::Comma);
    text.word("entity");
    text.word(entity_id);
    text.punct(Punct::Comma);
    text.word("highlighted");
    and_view(&mut text, ctx.view);
    text.punct(Punct::Period);
    if copies > 1 {
        text.words("Each copy is shown in a different shade.");
    }

    let alt = simple_alt(ctx, &format!("Entity {entity_id}"), "of");
    Ok(finish(
        ctx,
        &subject,
        &alt,
        &text,
        section(&["entity", entity_id]),
        None,
    ))
}

/// Representative chain with one domain family highlighted.
pub fn domain_caption(
    ctx: &CaptionContext<'_>,
    facts: &DomainFacts<'_>,
    color: Color,
) -> Result<CaptionRecord, Error> {
    let subject = ImageSubject::Domain {
        source: facts.source,
        family: facts.family.to_owned(),
        entity_id: facts.entity_id.to_owned(),
        chain_id: facts.chain_id.to_owned(),
        auth_chain_id: facts.auth_chain_id.to_owned(),
    };
    let counts = facts.counts;

    let mut text = TextBuilder::new();
    text.word("Chain");
    text.word(facts.auth_chain_id);
    text.word("of");
    push_entry(&mut text, ctx.entry_id);
    text.punct(Punct::Comma);
    text.words(facts.entity_name);
    text.punct(Punct::Comma);
    text.words("with the");
    text.word(facts.source.as_str());
    text.word("domain");
    text.colored(facts.family_name, color);
    text.word(&format!("({})", facts.family));
    text.word("highlighted");
    and_view(&mut text, ctx.view);
    text.punct(Punct::Period);
    text.word("Entity");
    text.word(facts.entity_id);
    text.word("contains");
    text.words(&count_noun(counts.total, "cop|y|ies")?);
    text.words("of this domain");
    text.punct(Punct::Semicolon);
    text.words(&count_noun(counts.shown, "cop|y|ies")?);
    text.words(&noun(counts.shown, "|is|are")?);
    text.words("shown on this chain.");
    if counts.out_of_range > 0 {
        text.words("Of these,");
        text.word(counts.out_of_range.to_string());
        text.words(&noun(counts.out_of_range, "li|es|e")?);
        text.words("outside the modelled residues.");
    }

    let mut alt = TextBuilder::new();
    alt.word(facts.source.as_str());
    alt.word("domain");
    alt.words(facts.family_name);
    alt.word("on");
    alt.word("chain");
    alt.word(facts.auth_chain_id);
    alt.word("of");
    push_entry(&mut alt, ctx.entry_id);

    let mut extras = Map::new();
    let _ = extras.insert("name".to_owned(), json!(facts.family_name));
    let _ = extras.insert("chain".to_owned(), json!(facts.auth_chain_id));
    let _ = extras.insert("number_of_copies".to_owned(), json!(counts.total));

    Ok(finish(
        ctx,
        &subject,
        &alt,
        &text,
        section(&[
            "entity",
            facts.entity_id,
            "database",
            facts.source.as_str(),
            facts.family,
        ]),
        Some(extras),
    ))
}

/// Binding environment of a ligand.
pub fn ligand_caption(
    ctx: &CaptionContext<'_>,
    entity_id: &str,
    compound_id: &str,
    ligand_name: &str,
    instances: usize,
    color: Color,
) -> Result<CaptionRecord, Error> {
    let subject = ImageSubject::Ligand {
        entity_id: entity_id.to_owned(),
        compound_id: compound_id.to_owned(),
    };

    let mut text = TextBuilder::new();
    text.words("The binding environment of");
    text.colored(compound_id, color);
    text.word(&format!("({ligand_name})"));
    text.word("in");
    push_entry(&mut text, ctx.entry_id);
    and_view(&mut text, ctx.view);
    text.punct(Punct::Period);
    text.words("The entry contains");
    text.words(&count_noun(instances, "cop|y|ies")?);
    text.words("of this ligand");
    if instances > 1 {
        text.punct(Punct::Semicolon);
        text.words("the first is shown");
    }
    text.punct(Punct::Period);

    let alt = simple_alt(
        ctx,
        &format!("Binding environment of {compound_id}"),
        "in",
    );
    let mut extras = Map::new();
    let _ = extras.insert("entity".to_owned(), json!(entity_id));
    let _ = extras.insert("number_of_instances".to_owned(), json!(instances));

    Ok(finish(
        ctx,
        &subject,
        &alt,
        &text,
        section(&["ligand", compound_id]),
        Some(extras),
    ))
}

/// Deposited structure with every modified residue of one compound
/// highlighted.
pub fn modres_caption(
    ctx: &CaptionContext<'_>,
    compound_id: &str,
    compound_name: &str,
    instances: usize,
    color: Color,
) -> Result<CaptionRecord, Error> {
    let subject = ImageSubject::Modres {
        compound_id: compound_id.to_owned(),
    };

    let mut text = TextBuilder::new();
    text.words("The deposited structure of");
    push_entry(&mut text, ctx.entry_id);
    text.word("with");
    text.words(&count_noun(instances, "instance|s")?);
    text.words("of the modified residue");
    text.colored(compound_id, color);
    if !compound_name.is_empty() {
        text.word(&format!("({compound_name})"));
    }
    text.word("highlighted");
    and_view(&mut text, ctx.view);
    text.punct(Punct::Period);

    let alt = simple_alt(ctx, &format!("Modified residue {compound_id}"), "in");
    Ok(finish(
        ctx,
        &subject,
        &alt,
        &text,
        section(&["modres", compound_id]),
        None,
    ))
}

/// Deposited structure colored by B-factor.
pub fn bfactor_caption(ctx: &CaptionContext<'_>) -> CaptionRecord {
    let mut text = TextBuilder::new();
    text.words("The deposited structure of");
    push_entry(&mut text, ctx.entry_id);
    text.words("coloured by B-factor");
    and_view(&mut text, ctx.view);
    text.punct(Punct::Colon);
    text.words("regions with higher B-factors are thicker and redder.");

    let alt = simple_alt(ctx, "B-factor", "of");
    finish(
        ctx,
        &ImageSubject::Bfactor,
        &alt,
        &text,
        section(&["entry", "bfactor"]),
        None,
    )
}

/// Deposited structure colored by geometry validation.
pub fn validation_caption(ctx: &CaptionContext<'_>) -> CaptionRecord {
    let mut text = TextBuilder::new();
    text.words("The deposited structure of");
    push_entry(&mut text, ctx.entry_id);
    text.words("coloured by geometry validation");
    and_view(&mut text, ctx.view);
    text.punct(Punct::Colon);
    text.words(
        "residues are coloured by the number of geometry outliers, \
         from green for none to red for three or more.",
    );

    let alt = simple_alt(ctx, "Geometry validation", "of");
    finish(
        ctx,
        &ImageSubject::Validation,
        &alt,
        &text,
        section(&["validation", "geometry", "deposited"]),
        None,
    )
}

/// Predicted structure colored by pLDDT.
pub fn plddt_caption(ctx: &CaptionContext<'_>) -> CaptionRecord {
    let mut text = TextBuilder::new();
    text.words("The predicted structure of");
    text.bold(ctx.entry_id);
    text.words("coloured by pLDDT confidence");
    and_view(&mut text, ctx.view);
    text.punct(Punct::Colon);
    text.words(
        "dark blue is very high, light blue confident, yellow low and \
         orange very low.",
    );

    let mut alt = TextBuilder::new();
    alt.words("pLDDT confidence of");
    alt.word(ctx.entry_id);
    if ctx.view.is_some() {
        alt.punct(Punct::Comma);
        push_view(&mut alt, ctx.view);
    }
    finish(
        ctx,
        &ImageSubject::Plddt,
        &alt,
        &text,
        section(&["entry", "plddt"]),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(view: Option<View>) -> CaptionContext<'static> {
        CaptionContext {
            entry_id: "1hda",
            view,
        }
    }

    fn haemoglobin(colored: bool) -> Vec<MoleculeSummary> {
        let color = |c| colored.then_some(Color(c));
        vec![
            MoleculeSummary {
                name: "Hemoglobin alpha chain".to_owned(),
                copies: 2,
                color: color(0x1b9e77),
            },
            MoleculeSummary {
                name: "Hemoglobin beta chain".to_owned(),
                copies: 2,
                color: color(0xd95f02),
            },
            MoleculeSummary {
                name: "HEME".to_owned(),
                copies: 4,
                color: color(0x8dd3c7),
            },
        ]
    }

    #[test]
    fn entry_by_chain() {
        let record = entry_caption(
            &ctx(Some(View::Front)),
            Coloring::Chain,
            "hetero-tetramer",
            &haemoglobin(false),
        )
        .unwrap();
        assert_eq!(record.filename, "1hda_deposited_chain_front");
        assert_eq!(
            record.clean_description,
            "The deposited structure of PDB entry 1hda, a hetero-tetramer, \
             coloured by chain and viewed from the front. The entry contains \
             2 copies of Hemoglobin alpha chain, 2 copies of Hemoglobin beta \
             chain and 4 copies of HEME."
        );
        assert_eq!(
            record.alt,
            "Deposited structure of PDB entry 1hda, viewed from the front, \
             coloured by chain"
        );
        assert_eq!(record.section, ["entry", "chain"]);
    }

    #[test]
    fn entry_by_entity_colors_names() {
        let record = entry_caption(
            &ctx(Some(View::Side)),
            Coloring::Entity,
            "hetero-tetramer",
            &haemoglobin(true),
        )
        .unwrap();
        assert!(record
            .description
            .contains("<span style=\"color:#d95f02\">Hemoglobin beta chain</span>"));
        assert!(!record.clean_description.contains('<'));
        assert_eq!(
            record.section,
            ["entry", "chemically_distinct_molecules"]
        );
    }

    #[test]
    fn assembly_mentions_state_and_preference() {
        let assembly = Assembly {
            assembly_id: "1".to_owned(),
            form: "hetero".to_owned(),
            name: "tetramer".to_owned(),
            preferred: true,
        };
        let record = assembly_caption(
            &ctx(Some(View::Top)),
            &assembly,
            true,
            Coloring::Chain,
        )
        .unwrap();
        assert_eq!(record.filename, "1hda_assembly_1_chain_top");
        assert!(record.clean_description.starts_with(
            "Assembly 1 of PDB entry 1hda, a hetero-tetramer, coloured by chain"
        ));
        assert!(record.clean_description.contains("preferred assembly"));
        assert_eq!(record.section, ["assembly", "1", "chain"]);
    }

    #[test]
    fn domain_counts_in_text() {
        let facts = DomainFacts {
            source: DomainSource::Cath,
            family: "1.10.490.10",
            family_name: "Globins",
            entity_id: "1",
            entity_name: "Hemoglobin alpha chain",
            chain_id: "A",
            auth_chain_id: "a",
            counts: DomainCounts {
                total: 2,
                shown: 1,
                out_of_range: 1,
            },
        };
        let record = domain_caption(&ctx(None), &facts, Color(0xe41a1c)).unwrap();
        assert_eq!(record.filename, "1hda_entity_1_a_CATH_1.10.490.10");
        assert_eq!(
            record.clean_description,
            "Chain a of PDB entry 1hda, Hemoglobin alpha chain, with the CATH \
             domain Globins (1.10.490.10) highlighted. Entity 1 contains 2 \
             copies of this domain; 1 copy is shown on this chain. Of these, \
             1 lies outside the modelled residues."
        );
        assert_eq!(
            record.section,
            ["entity", "1", "database", "CATH", "1.10.490.10"]
        );
        let extras = record.extras.unwrap();
        assert_eq!(extras["name"], "Globins");
    }

    #[test]
    fn ligand_extras() {
        let record = ligand_caption(
            &ctx(None),
            "3",
            "HEM",
            "PROTOPORPHYRIN IX CONTAINING FE",
            4,
            Color(0x8dd3c7),
        )
        .unwrap();
        assert_eq!(record.filename, "1hda_ligand_HEM");
        assert!(record
            .clean_description
            .ends_with("4 copies of this ligand; the first is shown."));
        let extras = record.extras.unwrap();
        assert_eq!(extras["entity"], "3");
        assert_eq!(extras["number_of_instances"], 4);
    }

    #[test]
    fn modres_single_instance() {
        let record =
            modres_caption(&ctx(None), "MSE", "SELENOMETHIONINE", 1, Color(0xe7298a))
                .unwrap();
        assert_eq!(record.filename, "1hda_modres_MSE");
        assert!(record
            .clean_description
            .contains("with 1 instance of the modified residue MSE (SELENOMETHIONINE)"));
    }

    #[test]
    fn ligand_and_modres_alt_text() {
        let ligand = ligand_caption(
            &ctx(None),
            "3",
            "HEM",
            "PROTOPORPHYRIN IX CONTAINING FE",
            4,
            Color(0x8dd3c7),
        )
        .unwrap();
        assert_eq!(ligand.alt, "Binding environment of HEM in PDB entry 1hda");
        let modres =
            modres_caption(&ctx(None), "MSE", "SELENOMETHIONINE", 2, Color(0xe7298a))
                .unwrap();
        assert_eq!(modres.alt, "Modified residue MSE in PDB entry 1hda");
    }

    #[test]
    fn single_view_types_join_the_view_clause() {
        let facts = DomainFacts {
            source: DomainSource::Cath,
            family: "1.10.490.10",
            family_name: "Globins",
            entity_id: "1",
            entity_name: "Hemoglobin alpha chain",
            chain_id: "A",
            auth_chain_id: "a",
            counts: DomainCounts {
                total: 1,
                shown: 1,
                out_of_range: 0,
            },
        };
        let record =
            domain_caption(&ctx(Some(View::Front)), &facts, Color(0xe41a1c))
                .unwrap();
        assert!(record
            .clean_description
            .contains("(1.10.490.10) highlighted and viewed from the front."));

        let modres =
            modres_caption(&ctx(Some(View::Side)), "MSE", "", 1, Color(0xe7298a))
                .unwrap();
        assert!(modres
            .clean_description
            .contains("MSE highlighted and viewed from the side."));

        let bfactor = bfactor_caption(&ctx(Some(View::Top)));
        assert!(bfactor
            .clean_description
            .contains("coloured by B-factor and viewed from the top:"));
    }

    #[test]
    fn alt_text_has_no_terminal_punctuation() {
        assert_eq!(bfactor_caption(&ctx(None)).alt, "B-factor of PDB entry 1hda");
        assert_eq!(
            validation_caption(&ctx(None)).alt,
            "Geometry validation of PDB entry 1hda"
        );
    }

    #[test]
    fn fixed_captions() {
        assert_eq!(bfactor_caption(&ctx(None)).filename, "1hda_bfactor");
        assert_eq!(
            validation_caption(&ctx(None)).section,
            ["validation", "geometry", "deposited"]
        );
        let plddt = plddt_caption(&CaptionContext {
            entry_id: "AF-P69905-F1",
            view: Some(View::Front),
        });
        assert_eq!(plddt.filename, "AF-P69905-F1_plddt_front");
        assert_eq!(plddt.section, ["entry", "plddt"]);
    }
}

//! Signature definitions for the QA pipelines
//!
//! The summarization and answer signatures carry a chain-of-thought
//! `reasoning` field; the query-generation signatures are plain
//! single-shot predictions.

use crate::domain::Signature;

pub fn initial_query_generation() -> Signature {
    Signature::new(
        "initial_query_generation",
        "Given a question, generate a search query to find relevant information.",
    )
    .input("question", "The question to answer")
    .output(
        "query",
        "A search query to find relevant information for answering the question",
    )
}

pub fn evidence_summarization() -> Signature {
    Signature::new(
        "evidence_summarization",
        "Given a question and scraped web content, summarize the key evidence relevant to \
         answering the question.",
    )
    .input("question", "The question to answer")
    .input("scraped_content", "Scraped web page content")
    .output(
        "evidence_summary",
        "A summary of the key evidence relevant to answering the question",
    )
    .with_reasoning()
}

pub fn followup_query_generation() -> Signature {
    Signature::new(
        "followup_query_generation",
        "Given a question and evidence gathered so far, generate a follow-up search query to \
         find additional information needed to answer the question.",
    )
    .input("question", "The question to answer")
    .input("evidence_summary", "Summary of evidence gathered so far")
    .output(
        "query",
        "A follow-up search query to find additional information needed to answer the question",
    )
}

pub fn cumulative_evidence_summarization() -> Signature {
    Signature::new(
        "cumulative_evidence_summarization",
        "Given a question, previously gathered evidence, and new scraped web content, produce \
         a cumulative summary of all evidence relevant to answering the question.",
    )
    .input("question", "The question to answer")
    .input(
        "prior_evidence_summary",
        "Summary of evidence gathered from previous retrieval steps",
    )
    .input("scraped_content", "Newly scraped web page content")
    .output(
        "evidence_summary",
        "A cumulative summary of all evidence relevant to answering the question",
    )
    .with_reasoning()
}

pub fn answer_generation() -> Signature {
    Signature::new(
        "answer_generation",
        "Given a question and gathered evidence, generate a concise answer to the question.",
    )
    .input("question", "The question to answer")
    .input(
        "evidence_summary",
        "Summary of all gathered evidence relevant to the question",
    )
    .output(
        "answer",
        "A concise answer to the question based on the evidence",
    )
    .with_reasoning()
}

pub fn direct_answer() -> Signature {
    Signature::new("direct_answer", "Evaluate a question and provide an answer.")
        .input("query", "The query to respond to")
        .output("response", "Response to the query")
}

use shared_types::CompleteSubmission;

/// Build the location-analysis prompt for a completed submission.
///
/// The output depends only on the four fields, so the same submission always
/// yields the same prompt.
pub fn build_prompt(submission: &CompleteSubmission) -> String {
    format!(
        "Analise as seguintes informações para um novo negócio:
- Orçamento: R$ {budget}
- Cidade: {city}
- Tipo de Negócio: {investment_type}
- Público-alvo: {target_audience}

Por favor, forneça recomendações detalhadas sobre a melhor localização para este negócio, considerando:
1. Áreas específicas da cidade que melhor atendem ao público-alvo
2. Análise do fluxo de pessoas e acessibilidade
3. Proximidade com estabelecimentos complementares
4. Considerações sobre o orçamento disponível
5. Potencial de crescimento da região",
        budget = submission.budget,
        city = submission.city,
        investment_type = submission.investment_type,
        target_audience = submission.target_audience,
    )
}

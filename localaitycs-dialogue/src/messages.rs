//! Assistant texts, in the user's locale (pt-BR).

pub const GREETING: &str = "Olá, seja bem-vindo ao assistente do LocalAItycs! Vamos buscar a melhor opção de localização para seu negócio. Para isso, precisamos de alguns dados.";

pub const ASK_BUDGET: &str = "Para começar, qual o seu orçamento?";

pub const INVALID_BUDGET: &str = "Por favor, insira um valor numérico válido para o orçamento.";

pub const ASK_CITY: &str = "Em qual cidade seu negócio será localizado?";

pub const ASK_INVESTMENT_TYPE: &str = "Obrigado! Agora, qual o tipo de investimento? Exemplo: Sorveteria, Escola de idiomas, Lanchonete, etc.";

pub const ASK_TARGET_AUDIENCE: &str = "Ótimo! Agora, qual será o público-alvo do seu negócio? Exemplo: Jovens universitários, famílias, profissionais liberais, etc.";

pub const PROCESSING: &str = "Perfeito! Processando suas informações para encontrar as melhores opções para seu negócio...";

pub const GENERIC_FAILURE: &str = "Desculpe, ocorreu um erro ao processar sua solicitação. Por favor, tente novamente.";

pub const ALREADY_COMPLETED: &str = "Esta conversa já foi concluída. Inicie uma nova conversa para uma nova análise.";
